//! CLI command implementations for kn-template.
//!
//! Each module corresponds to a subcommand (`kn-template <command>`).

pub mod list;
pub mod placeholders;
pub mod render;

use std::path::Path;

use anyhow::{Context, Result};

use kn_template_core::config::TemplateConfig;
use kn_template_core::store::{FsTemplateStore, TemplateStore};

/// Open the filesystem store described by the config at `config_path`.
pub fn open_store(config_path: &Path) -> Result<FsTemplateStore> {
    let config = TemplateConfig::load_or_default(config_path)?;
    Ok(FsTemplateStore::from_config(&config, config_path))
}

/// Load template text either from `file` or by `name` from the configured store.
///
/// Returns a label for display alongside the text.
pub async fn load_template(
    config_path: &Path,
    name: Option<&str>,
    file: Option<&Path>,
) -> Result<(String, String)> {
    if let Some(file) = file {
        let text = tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("failed to read template file {}", file.display()))?;
        return Ok((file.display().to_string(), text));
    }

    let Some(name) = name else {
        anyhow::bail!("either a template name or --file is required");
    };
    let store = open_store(config_path)?;
    let text = store.load(name).await?;
    Ok((name.to_string(), text))
}
