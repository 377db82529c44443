//! # Value Rendering
//!
//! Helpers that turn input values into the text used inside error messages,
//! plus the truthiness rule the object matcher uses to decide whether a
//! field's result is written to the output.
//!
//! ## Rules
//!
//! 1. [`describe`] renders a value as compact JSON, keeping object key order.
//!    A missing value renders as `undefined`.
//! 2. [`display_value`] renders a value for "Invalid type" messages: strings
//!    bare, everything else as [`describe`] does.
//! 3. [`is_truthy`]: `null`, `false`, `0` and `""` are falsy. Arrays and
//!    objects are truthy even when empty.

use serde_json::Value;

/// Compact JSON rendering of an optional value, `undefined` when absent.
pub fn describe(value: Option<&Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "undefined".to_string(),
    }
}

/// Rendering used where a value is interpolated as plain text.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        other => describe(other),
    }
}

/// Whether a value counts as present on its own merits.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
