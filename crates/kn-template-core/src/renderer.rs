//! Placeholder substitution.
//!
//! [`render_template`] is total: every `{{ name }}` token is replaced by the
//! value's canonical text (strings sanitized, null and absent values empty),
//! and everything else is copied through unchanged. Inserted values are never
//! rescanned for placeholders.
//!
//! ## Usage
//!
//! ```
//! use kn_template_core::renderer::render_template;
//! use kn_template_core::value::Values;
//!
//! let values = Values::new().with("name", "Ada").with("count", 3);
//! let out = render_template("Hello {{ name }}, you have {{count}} reviews{{missing}}.", &values);
//! assert_eq!(out, "Hello Ada, you have 3 reviews.");
//! ```

use regex::Captures;

use crate::placeholder::{extract_placeholders, PLACEHOLDER_RE};
use crate::value::Values;

/// Render `template` against `values`.
pub fn render_template(template: &str, values: &Values) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| {
            values
                .get(&caps[1])
                .map(|value| value.to_text())
                .unwrap_or_default()
        })
        .into_owned()
}

/// Object handle over the free rendering functions.
///
/// Holds no state; every call is independent, so one renderer can be shared
/// freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render a template string with the given values.
    pub fn render(&self, template: &str, values: &Values) -> String {
        render_template(template, values)
    }

    /// Distinct placeholder names, in order of first appearance.
    pub fn placeholders(&self, template: &str) -> Vec<String> {
        extract_placeholders(template)
    }
}
