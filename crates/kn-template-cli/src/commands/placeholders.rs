use std::path::Path;

use anyhow::Result;

use kn_template_core::placeholder::extract_placeholders;

use crate::output;

/// Print the distinct placeholder names of a template, one per line or as JSON.
pub async fn run(
    config_path: &Path,
    name: Option<&str>,
    file: Option<&Path>,
    json: bool,
) -> Result<()> {
    let (label, text) = super::load_template(config_path, name, file).await?;
    let names = extract_placeholders(&text);
    tracing::info!(template = %label, count = names.len(), "extracted placeholders");

    if json {
        println!("{}", serde_json::to_string(&names)?);
        return Ok(());
    }

    output::print_header(&format!("kn-template placeholders: {label}"));
    if names.is_empty() {
        output::print_warning("template has no placeholders");
    }
    for name in &names {
        println!("{name}");
    }

    Ok(())
}
