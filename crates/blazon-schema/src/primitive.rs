//! # Primitive Matcher
//!
//! Leaf checks that never suspend: scalar markers and container instance
//! checks. A value matches a marker only when its JSON variant is exactly
//! that kind. Numbers in strings, `0` for `false` and the like are rejected.

use serde_json::Value;

use blazon_core::{describe, display_value, ErrorEntry, FieldPath, Outcome, Resolved};

use crate::spec::{InstanceKind, Primitive};

/// Check `value` against a scalar marker.
pub(crate) fn match_primitive(
    primitive: Primitive,
    value: Option<&Value>,
    path: &FieldPath,
) -> Outcome {
    match value {
        Some(v) if primitive.matches(v) => Ok(Resolved::Value(v.clone())),
        _ => {
            let expected = match primitive {
                Primitive::Null => "null".to_string(),
                other => format!("a {other}"),
            };
            Err(vec![ErrorEntry::at(
                path,
                format!(
                    "{} must be {expected}, but saw `{}`",
                    path.subject(),
                    describe(value)
                ),
            )])
        }
    }
}

/// Check that `value` is a container of `kind`, without descending into it.
pub(crate) fn match_instance(
    kind: InstanceKind,
    value: Option<&Value>,
    path: &FieldPath,
) -> Outcome {
    match value {
        Some(v) if kind.matches(v) => Ok(Resolved::Value(v.clone())),
        _ => Err(vec![ErrorEntry::at(
            path,
            format!(
                "Invalid type: Expected {}, Got: {}",
                kind.name(),
                display_value(value)
            ),
        )]),
    }
}
