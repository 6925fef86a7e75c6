//! Placeholder grammar and extraction.
//!
//! A placeholder is `{{ name }}` where `name` is 1 to 64 characters drawn from
//! `[a-zA-Z0-9_.-]`, optionally padded with whitespace inside the braces.
//! Anything that does not fit the grammar is plain text: `{{ bad name }}`,
//! `{{}}` and names longer than 64 characters are never placeholders.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{KnTemplateError, Result};
use crate::value::Values;

/// Maximum length of a placeholder name, in characters.
pub const MAX_NAME_LEN: usize = 64;

/// Matches a whole placeholder token; group 1 is the name.
pub(crate) static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([a-zA-Z0-9_.\-]{1,64})\s*\}\}").expect("placeholder pattern is valid")
});

/// Return the distinct placeholder names in `template`, in order of first
/// appearance.
///
/// ```
/// use kn_template_core::placeholder::extract_placeholders;
///
/// let names = extract_placeholders("Hello {{name}}, today is {{ day }}. Bye {{name}}");
/// assert_eq!(names, vec!["name", "day"]);
/// ```
pub fn extract_placeholders(template: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for name in PLACEHOLDER_RE
        .captures_iter(template)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
    {
        if seen.insert(name) {
            names.push(name.to_string());
        }
    }

    names
}

/// Whether `name` is a legal placeholder name.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_NAME_LEN
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'-'))
}

/// Check `name` against the placeholder grammar.
pub fn validate_name(name: &str) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(KnTemplateError::InvalidName(name.to_string()))
    }
}

/// Placeholder names in `template` with no usable value in `values`.
///
/// A name counts as missing when it is absent or mapped to null. Order
/// follows [`extract_placeholders`].
pub fn missing_placeholders(template: &str, values: &Values) -> Vec<String> {
    extract_placeholders(template)
        .into_iter()
        .filter(|name| values.get(name).is_none_or(|v| v.is_null()))
        .collect()
}
