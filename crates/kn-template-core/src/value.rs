//! Typed scalar values supplied to the renderer.
//!
//! Request bodies arrive as loosely typed JSON. [`Values::from_json`] is the
//! boundary where that JSON becomes a map of [`ScalarValue`]s: strings,
//! numbers, booleans and null survive, arrays and objects are dropped. A
//! dropped entry renders exactly like an absent one.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

use crate::error::{KnTemplateError, Result};
use crate::sanitize::sanitize_value;

/// A single scalar value substitutable into a template.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    /// Free text. Sanitized on substitution.
    Text(String),
    /// A JSON number, printed in canonical form.
    Number(Number),
    Bool(bool),
    /// Renders as the empty string.
    Null,
}

impl ScalarValue {
    /// Convert a JSON value, returning `None` for arrays and objects.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Number(n) => Some(Self::Number(n.clone())),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Null => Some(Self::Null),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The text substituted for this value.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => sanitize_value(s),
            Self::Number(n) => canonical_number(n),
            Self::Bool(b) => b.to_string(),
            Self::Null => String::new(),
        }
    }
}

/// Format a number the way JavaScript's `String(n)` does for finite values.
///
/// Integers keep every digit; JSON integers never reach the `1e21` cutoff.
fn canonical_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) => js_float_to_string(f),
        None => n.to_string(),
    }
}

/// `Number.prototype.toString()` for a finite `f64`.
///
/// Rust's `{:e}` yields the shortest round-trip digits; the JS layout rules
/// (plain notation for exponents in `-7..21`, `e+`/`e-` otherwise) are
/// applied on top.
fn js_float_to_string(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }

    let sci = format!("{:e}", f.abs());
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return f.to_string();
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return f.to_string();
    };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let k = digits.len() as i32;
    // Decimal point position relative to the digit string.
    let n = exp + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let (first, rest) = digits.split_at(1);
        let sign = if n - 1 >= 0 { '+' } else { '-' };
        let exp = (n - 1).abs();
        if rest.is_empty() {
            format!("{first}e{sign}{exp}")
        } else {
            format!("{first}.{rest}e{sign}{exp}")
        }
    };

    if f.is_sign_negative() {
        format!("-{body}")
    } else {
        body
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for ScalarValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<i32> for ScalarValue {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for ScalarValue {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

/// Non-finite floats have no JSON representation and become [`ScalarValue::Null`].
impl From<f64> for ScalarValue {
    fn from(f: f64) -> Self {
        Number::from_f64(f).map_or(Self::Null, Self::Number)
    }
}

impl<T: Into<ScalarValue>> From<Option<T>> for ScalarValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Mapping from placeholder name to scalar value.
///
/// A name with no entry is "undefined"; rendering treats it the same as
/// [`ScalarValue::Null`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Values {
    entries: HashMap<String, ScalarValue>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous one for `name`.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ScalarValue>,
    ) -> Option<ScalarValue> {
        self.entries.insert(name.into(), value.into())
    }

    /// Builder form of [`Values::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ScalarValue> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScalarValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merge `other` into `self`; entries in `other` win.
    pub fn extend(&mut self, other: Values) {
        self.entries.extend(other.entries);
    }

    /// Build a value map from a JSON object.
    ///
    /// Members holding arrays or objects are dropped so that structured data
    /// can never reach rendered text. Anything other than an object at the
    /// top level is rejected.
    pub fn from_json(value: &Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(KnTemplateError::InvalidValues(format!(
                "expected a JSON object, found {}",
                json_kind(value)
            )));
        };

        let mut entries = HashMap::with_capacity(map.len());
        for (name, member) in map {
            match ScalarValue::from_json(member) {
                Some(scalar) => {
                    entries.insert(name.clone(), scalar);
                }
                None => {
                    tracing::debug!(name = %name, kind = json_kind(member), "dropping non-scalar value");
                }
            }
        }

        Ok(Self { entries })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl<K: Into<String>, V: Into<ScalarValue>> FromIterator<(K, V)> for Values {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'de> Deserialize<'de> for Values {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Values::from_json(&raw).map_err(serde::de::Error::custom)
    }
}
