//! # Error Types: Structured Error Hierarchy
//!
//! Two kinds of failure exist and they never mix:
//!
//! - **Data failures** are reported through validation. Each one is an
//!   [`ErrorEntry`] carrying the dotted path of the offending field and a
//!   human-readable message. A failed root validation collects every entry of
//!   the tree into one [`ValidationFailure`].
//! - **Spec failures** are programmer mistakes in spec construction (an empty
//!   `Or`, a field declared twice). They surface as [`SpecError`] when the
//!   validator is built, before any data is seen.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::path::FieldPath;

/// A single path-tagged validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Dotted path from the named root. `None` at an unnamed root.
    pub path: Option<String>,
    /// Human-readable description of the failure.
    pub message: String,
}

impl ErrorEntry {
    /// Entry reported at `path`.
    pub fn at(path: &FieldPath, message: impl Into<String>) -> Self {
        Self {
            path: path.full().map(str::to_string),
            message: message.into(),
        }
    }

    /// Entry with an explicit path string.
    pub fn new(path: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            path: path.map(str::to_string),
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{path}: {}", self.message),
            None => write!(f, "(root): {}", self.message),
        }
    }
}

/// Failure of a root validation: a summary message plus every entry found.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}:\n{}", EntryList(.errors))]
pub struct ValidationFailure {
    /// `Invalid <validator name>`, or `Invalid data` for an unnamed validator.
    pub message: String,
    /// Flat list of failures in declaration order.
    pub errors: Vec<ErrorEntry>,
}

impl ValidationFailure {
    /// Failure of the validator called `name`. A missing or empty name reads
    /// as `data`.
    pub fn new(name: Option<&str>, errors: Vec<ErrorEntry>) -> Self {
        let name = name.filter(|n| !n.is_empty()).unwrap_or("data");
        Self {
            message: format!("Invalid {name}"),
            errors,
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if no entries were recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consumes self and returns the entries.
    pub fn into_errors(self) -> Vec<ErrorEntry> {
        self.errors
    }
}

struct EntryList<'a>(&'a [ErrorEntry]);

impl fmt::Display for EntryList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {entry}")?;
        }
        Ok(())
    }
}

/// A spec that cannot be validated against. Raised at validator construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// `And` or `Or` declared without any branch.
    #[error("{combinator} at '{path}' needs at least one branch")]
    EmptyCombinator {
        /// `And` or `Or`.
        combinator: &'static str,
        /// Where in the spec the combinator sits.
        path: String,
    },

    /// An object spec declares the same field more than once.
    #[error("field '{field}' is declared more than once at '{path}'")]
    DuplicateField {
        /// The repeated field name.
        field: String,
        /// The object spec declaring it.
        path: String,
    },

    /// An object spec declares a field with an empty name.
    #[error("empty field name declared at '{path}'")]
    EmptyFieldName {
        /// The object spec declaring it.
        path: String,
    },
}
