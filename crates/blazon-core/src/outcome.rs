//! # Validation Outcomes
//!
//! Every validation step resolves to an [`Outcome`]: either a [`Resolved`]
//! value or a flat list of [`ErrorEntry`] failures.

use serde_json::Value;

use crate::error::ErrorEntry;
use crate::render::is_truthy;

/// Result of one validation step.
pub type Outcome = Result<Resolved, Vec<ErrorEntry>>;

/// What a successful step produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// A validated value.
    Value(Value),
    /// Fallback supplied by an optional field whose input was missing.
    Default(Value),
    /// The input was missing and nothing replaced it.
    Absent,
}

impl Resolved {
    /// Wrap an optional input value, keeping absence.
    pub fn from_input(value: Option<&Value>) -> Self {
        match value {
            Some(v) => Self::Value(v.clone()),
            None => Self::Absent,
        }
    }

    /// The carried value with any default unwrapped.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Value(v) | Self::Default(v) => Some(v),
            Self::Absent => None,
        }
    }

    /// Whether this result earns a slot in the output map on its own,
    /// without the key having been present in the input.
    ///
    /// Defaults always do. Plain values do when they are truthy.
    pub fn is_substantive(&self) -> bool {
        match self {
            Self::Default(_) => true,
            Self::Value(v) => is_truthy(v),
            Self::Absent => false,
        }
    }
}
