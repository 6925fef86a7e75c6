use std::path::Path;

use anyhow::Result;

use kn_template_core::registry::TemplateRegistry;

use crate::output;

/// List the templates in the configured directory with their placeholders.
pub async fn run(config_path: &Path) -> Result<()> {
    let store = super::open_store(config_path)?;
    output::print_header("kn-template list");
    output::print_key_value("Directory", &store.dir().display().to_string());

    let mut registry = TemplateRegistry::new();
    let count = registry.load_from(&store).await?;
    if count == 0 {
        output::print_warning("no templates found");
        return Ok(());
    }

    for name in registry.names() {
        let placeholders = registry.placeholders(name)?;
        println!("{name}\t{}", placeholders.join(", "));
    }
    output::print_success(&format!("{count} template(s)"));

    Ok(())
}
