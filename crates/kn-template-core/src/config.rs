//! Configuration file (`kn-template.config.json`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{KnTemplateError, Result};

/// Default file name looked up by the CLI.
pub const CONFIG_FILE: &str = "kn-template.config.json";

/// Where templates live and how their files are named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory holding template files. Relative paths are resolved
    /// against the directory containing the config file.
    pub templates_dir: PathBuf,
    /// File extension of template files, without the leading dot.
    pub extension: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("templates"),
            extension: "md".into(),
        }
    }
}

impl TemplateConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| KnTemplateError::ConfigNotFound {
                path: path.to_path_buf(),
                source: e,
            })?;
        serde_json::from_str(&contents).map_err(|e| KnTemplateError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| KnTemplateError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Templates directory, anchored at the config file's parent directory.
    pub fn resolve_templates_dir(&self, config_path: &Path) -> PathBuf {
        if self.templates_dir.is_absolute() {
            return self.templates_dir.clone();
        }
        let base = config_path.parent().unwrap_or(Path::new("."));
        base.join(&self.templates_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let config = TemplateConfig {
            templates_dir: PathBuf::from("docs/templates"),
            extension: "txt".into(),
        };
        config.save(&path).unwrap();
        assert_eq!(TemplateConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_config_partial_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{"extension": "tmpl"}"#).unwrap();
        let config = TemplateConfig::load(&path).unwrap();
        assert_eq!(config.extension, "tmpl");
        assert_eq!(config.templates_dir, PathBuf::from("templates"));
    }

    #[test]
    fn test_config_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            TemplateConfig::load(&path),
            Err(KnTemplateError::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_config_missing() {
        let path = Path::new("/tmp/nonexistent_kn_template/kn-template.config.json");
        assert!(matches!(
            TemplateConfig::load(path),
            Err(KnTemplateError::ConfigNotFound { .. })
        ));
        assert_eq!(TemplateConfig::load_or_default(path).unwrap(), TemplateConfig::default());
    }

    #[test]
    fn test_resolve_templates_dir() {
        let config = TemplateConfig::default();
        assert_eq!(
            config.resolve_templates_dir(Path::new("/srv/kn/kn-template.config.json")),
            PathBuf::from("/srv/kn/templates")
        );
        assert_eq!(
            config.resolve_templates_dir(Path::new("kn-template.config.json")),
            PathBuf::from("templates")
        );

        let absolute = TemplateConfig {
            templates_dir: PathBuf::from("/opt/templates"),
            ..TemplateConfig::default()
        };
        assert_eq!(
            absolute.resolve_templates_dir(Path::new("/srv/kn/kn-template.config.json")),
            PathBuf::from("/opt/templates")
        );
    }
}
