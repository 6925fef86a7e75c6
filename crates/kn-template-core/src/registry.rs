//! Named template registry.
//!
//! A [`TemplateRegistry`] is built explicitly and handed to whoever renders.
//! It never loads anything on its own: callers populate it with
//! [`TemplateRegistry::register`] or [`TemplateRegistry::load_from`].

use std::collections::HashMap;

use crate::error::{KnTemplateError, Result};
use crate::placeholder::extract_placeholders;
use crate::renderer::render_template;
use crate::store::TemplateStore;
use crate::value::Values;

#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, String>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `text` under `name`, returning the template it replaced.
    pub fn register(&mut self, name: impl Into<String>, text: impl Into<String>) -> Option<String> {
        self.templates.insert(name.into(), text.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.templates.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Render the template registered as `name`.
    pub fn render(&self, name: &str, values: &Values) -> Result<String> {
        let text = self
            .get(name)
            .ok_or_else(|| KnTemplateError::UnknownTemplate(name.to_string()))?;
        Ok(render_template(text, values))
    }

    /// Placeholder names of the template registered as `name`.
    pub fn placeholders(&self, name: &str) -> Result<Vec<String>> {
        let text = self
            .get(name)
            .ok_or_else(|| KnTemplateError::UnknownTemplate(name.to_string()))?;
        Ok(extract_placeholders(text))
    }

    /// Register every template `store` lists. Returns the number loaded.
    ///
    /// All-or-nothing: if any load fails the registry is left unchanged.
    pub async fn load_from(&mut self, store: &dyn TemplateStore) -> Result<usize> {
        let names = store.list().await?;
        let mut staged = Vec::with_capacity(names.len());
        for name in names {
            let text = store.load(&name).await?;
            staged.push((name, text));
        }

        let count = staged.len();
        self.templates.extend(staged);
        tracing::info!(store = store.name(), count, "loaded templates");
        Ok(count)
    }
}
