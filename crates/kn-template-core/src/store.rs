//! Sources of template text.
//!
//! Template records live outside this crate (the application keeps them in
//! its database). [`TemplateStore`] is the seam: the registry pulls template
//! text through it, and this module ships a filesystem store for the CLI and
//! an in-memory store for tests and embedding.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::config::TemplateConfig;
use crate::error::{KnTemplateError, Result};

/// Anything that can list and load named templates.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Short identifier used in logs: "fs", "memory".
    fn name(&self) -> &'static str;

    /// Names of every template the store holds, sorted.
    async fn list(&self) -> Result<Vec<String>>;

    /// Text of the template called `name`.
    async fn load(&self, name: &str) -> Result<String>;
}

/// Templates stored as `<dir>/<name>.<extension>` files.
#[derive(Debug, Clone)]
pub struct FsTemplateStore {
    dir: PathBuf,
    extension: String,
}

impl FsTemplateStore {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    /// Build a store from a loaded config located at `config_path`.
    pub fn from_config(config: &TemplateConfig, config_path: &Path) -> Self {
        Self::new(config.resolve_templates_dir(config_path), config.extension.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{}", self.extension))
    }
}

#[async_trait]
impl TemplateStore for FsTemplateStore {
    fn name(&self) -> &'static str {
        "fs"
    }

    async fn list(&self) -> Result<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(KnTemplateError::TemplateDirNotFound(self.dir.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str()) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }

        names.sort();
        tracing::debug!(dir = %self.dir.display(), count = names.len(), "listed templates");
        Ok(names)
    }

    async fn load(&self, name: &str) -> Result<String> {
        // Names are file stems; anything that could escape the directory is not one.
        if name.is_empty() || name.contains(['/', '\\']) || name == ".." {
            return Err(KnTemplateError::TemplateNotFound(name.to_string()));
        }

        let path = self.path_for(name);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => {
                tracing::debug!(path = %path.display(), bytes = text.len(), "loaded template");
                Ok(text)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(KnTemplateError::TemplateNotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Templates held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateStore {
    templates: BTreeMap<String, String>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.templates.insert(name.into(), text.into());
        self
    }
}

#[async_trait]
impl TemplateStore for MemoryTemplateStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<String>> {
        Ok(self.templates.keys().cloned().collect())
    }

    async fn load(&self, name: &str) -> Result<String> {
        self.templates
            .get(name)
            .cloned()
            .ok_or_else(|| KnTemplateError::TemplateNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fs_store_list_and_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("weekly.md"), "Week {{week}}").unwrap();
        std::fs::write(dir.path().join("retro.md"), "Retro for {{team}}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        std::fs::create_dir(dir.path().join("nested.md")).unwrap();

        let store = FsTemplateStore::new(dir.path(), "md");
        assert_eq!(store.list().await.unwrap(), vec!["retro", "weekly"]);
        assert_eq!(store.load("weekly").await.unwrap(), "Week {{week}}");
    }

    #[tokio::test]
    async fn test_fs_store_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsTemplateStore::new(dir.path(), "md");
        assert!(matches!(
            store.load("nope").await,
            Err(KnTemplateError::TemplateNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_fs_store_rejects_path_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsTemplateStore::new(dir.path().join("inner"), "md");
        std::fs::create_dir(dir.path().join("inner")).unwrap();
        std::fs::write(dir.path().join("secret.md"), "x").unwrap();
        assert!(matches!(
            store.load("../secret").await,
            Err(KnTemplateError::TemplateNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_fs_store_missing_dir() {
        let store = FsTemplateStore::new("/tmp/nonexistent_kn_template_dir", "md");
        assert!(matches!(
            store.list().await,
            Err(KnTemplateError::TemplateDirNotFound(_))
        ));
    }

    #[test]
    fn test_fs_store_from_config() {
        let config = TemplateConfig::default();
        let store = FsTemplateStore::from_config(&config, Path::new("/srv/kn/kn-template.config.json"));
        assert_eq!(store.dir(), Path::new("/srv/kn/templates"));
        assert_eq!(store.path_for("daily"), PathBuf::from("/srv/kn/templates/daily.md"));
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryTemplateStore::new()
            .with("b", "two")
            .with("a", "one");
        assert_eq!(store.name(), "memory");
        assert_eq!(store.list().await.unwrap(), vec!["a", "b"]);
        assert_eq!(store.load("a").await.unwrap(), "one");
        assert!(store.load("c").await.is_err());
    }
}
