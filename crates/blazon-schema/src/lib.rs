//! # blazon-schema: Declarative Data-Shape Validation
//!
//! Validates `serde_json` values against declarative specs and reports every
//! failure of the tree in one pass.
//!
//! ## Example
//!
//! ```
//! use blazon_schema::{Spec, Validator};
//! use serde_json::json;
//!
//! let user = Validator::named(
//!     "User",
//!     Spec::object([
//!         ("name", Spec::required(Spec::string())),
//!         ("age", Spec::number()),
//!         ("role", Spec::maybe_or(Spec::string(), json!("member"))),
//!     ]),
//! )
//! .unwrap();
//!
//! let failure = user
//!     .validate_blocking(&json!({ "name": 123, "age": null }))
//!     .unwrap_err();
//! assert_eq!(failure.message, "Invalid User");
//! assert_eq!(failure.errors.len(), 2);
//!
//! let ok = user
//!     .validate_blocking(&json!({ "name": "bob", "age": 42 }))
//!     .unwrap();
//! assert_eq!(ok, json!({ "name": "bob", "age": 42, "role": "member" }));
//! ```
//!
//! ## Engine Layout
//!
//! - [`spec`]: the [`Spec`] sum type and its constructors.
//! - `check`: exhaustive dispatch over spec variants.
//! - `primitive`: scalar markers and container instance checks.
//! - `combinator`: `Required`, `Maybe`, `Custom`, `And`, `Or`.
//! - `object`: field-by-field object matching.
//! - `aggregate`: run sibling checks together, keep every failure.
//! - [`validator`]: the reusable, nestable entry point.
//!
//! ## Crate Policy
//!
//! - Depends only on `blazon-core` internally.
//! - Data failures are values, never panics. Only spec construction can
//!   fail outside of validation, and it does so with `SpecError`.

mod aggregate;
mod check;
mod combinator;
mod object;
mod primitive;
pub mod spec;
pub mod validator;

pub use blazon_core::{
    ErrorEntry, FieldPath, Outcome, Resolved, SpecError, ValidationFailure,
};
pub use spec::{Custom, CustomResult, InstanceKind, ObjectSpec, Primitive, Spec};
pub use validator::Validator;
