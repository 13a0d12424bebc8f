//! Configuration tokens and their normalized comparison form

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Leading characters that mark a config line as a comment or a negation.
pub const NON_SEMANTIC_MARKERS: [char; 2] = ['#', '!'];

/// Render any JSON value to its canonical string form, without trimming.
///
/// Strings are taken as-is and `null` is the empty string. Booleans render as
/// `True`/`False`; numbers use their JSON spelling. Arrays and objects nested inside a section are
/// rendered as compact JSON so they can still be compared as opaque lines.
pub fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => String::from("True"),
        Value::Bool(false) => String::from("False"),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Canonicalize a raw token: render it, then strip surrounding whitespace.
///
/// Internal whitespace and case are preserved. Never fails.
pub fn normalize(value: &Value) -> String {
    normalize_str(&render(value))
}

/// Normalize an already-rendered token.
pub fn normalize_str(raw: &str) -> String {
    raw.trim().to_string()
}

/// Falsy values are dropped from observed sections before comparison.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map(|f| f == 0.0).unwrap_or(false),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Human-readable JSON type name, used in shape errors.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A single configuration entry, kept in both its original and normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Original rendering, used in report messages
    pub raw: String,
    /// Trimmed form, used for every comparison
    pub normalized: String,
}

impl Token {
    pub fn from_value(value: &Value) -> Self {
        let raw = render(value);
        let normalized = normalize_str(&raw);
        Self { raw, normalized }
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Comment (`#...`) and negation (`!...`) lines carry no compliance meaning.
    pub fn is_non_semantic(&self) -> bool {
        self.normalized.starts_with(NON_SEMANTIC_MARKERS)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}
