//! # Field Paths
//!
//! A `FieldPath` records where in the input tree a check is running. It is
//! carried for error reporting only and never influences matching.
//!
//! The path has two parts:
//!
//! - `full`: the dotted path from the named root, e.g. `User.address.city`.
//! - `field`: the last segment alone, e.g. `city`, used as the subject of
//!   error messages.
//!
//! An unnamed root has neither part. Descending into a field of an unnamed
//! root starts the dotted path at that field.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a check inside the input tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldPath {
    full: Option<String>,
    field: Option<String>,
}

impl FieldPath {
    /// Root path of a validator. A named root reports failures under its name.
    pub fn root(name: Option<&str>) -> Self {
        Self {
            full: name.map(str::to_string),
            field: name.map(str::to_string),
        }
    }

    /// Path of `key` nested one level below `self`.
    pub fn child(&self, key: &str) -> Self {
        let full = match &self.full {
            Some(parent) if !parent.is_empty() => format!("{parent}.{key}"),
            _ => key.to_string(),
        };
        Self {
            full: Some(full),
            field: Some(key.to_string()),
        }
    }

    /// The dotted path from the root, if any.
    pub fn full(&self) -> Option<&str> {
        self.full.as_deref()
    }

    /// The last path segment, if any.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Subject used in error messages. Falls back to `data` at an unnamed root.
    pub fn subject(&self) -> &str {
        self.field.as_deref().unwrap_or("data")
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full.as_deref().unwrap_or("(root)"))
    }
}
