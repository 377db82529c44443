//! # blazon-core: Foundational Types for Blazon
//!
//! This crate is the leaf of the Blazon workspace. It defines the vocabulary
//! the validation engine speaks: where a failure happened, what the failure
//! says, and what a successful step produced.
//!
//! ## Key Design Principles
//!
//! 1. **Flat error lists.** A failed step yields `Vec<ErrorEntry>` from the
//!    start. Parents concatenate; nothing is ever nested and flattened later.
//!
//! 2. **Absent is not null.** Input values are `Option<&Value>`. `None` is a
//!    missing key, `Some(Value::Null)` is an explicit `null`. The engine keeps
//!    the distinction all the way to the output map.
//!
//! 3. **Defaults are tagged.** `Resolved::Default` marks a fallback produced by
//!    an optional field so the object matcher can tell it apart from a value
//!    that was actually present in the input.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `blazon-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod outcome;
pub mod path;
pub mod render;

pub use error::{ErrorEntry, SpecError, ValidationFailure};
pub use outcome::{Outcome, Resolved};
pub use path::FieldPath;
pub use render::{describe, display_value, is_truthy};
