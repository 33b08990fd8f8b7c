//! # Form Snapshot
//!
//! The value the form view is populated from. Derived from the document
//! text on demand and never stored.

use serde_json::{Map, Value};

/// Best-effort parse of `text` for the form view.
///
/// Returns the parsed value, whatever its shape. Text that does not parse
/// yields an empty object. This is a display fallback only: it never
/// feeds into a validation result.
pub fn derive_form_snapshot(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::Object(Map::new()))
}

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy; every array
/// and object is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
