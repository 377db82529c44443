//! # Validators
//!
//! A [`Validator`] is a built, named, reusable spec. It is the entry point of
//! a validation and can also be nested inside another spec as a leaf.
//!
//! ## Calling Conventions
//!
//! - **Standalone**: [`Validator::validate`] (and its blocking and callback
//!   forms) runs at the validator's own root. Failures are wrapped as
//!   `Invalid <name>` (or `Invalid data` when unnamed) with every entry found.
//! - **Nested**: when used as a leaf, the validator runs at the parent's
//!   path. Entries are passed up unwrapped and keep the parent's path, so a
//!   validator nested under `sub` reports `sub.something`, never its own
//!   root name.
//!
//! ## Construction
//!
//! Building a validator verifies the spec. Malformed specs (an empty `Or`, a
//! field declared twice) are rejected immediately with a [`SpecError`].
//!
//! ## Thread Safety
//!
//! `Validator` is `Send + Sync` and cheap to clone. The futures it returns
//! are `Send` and may be driven on any runtime.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use blazon_core::{FieldPath, Outcome, SpecError, ValidationFailure};

use crate::check::check;
use crate::spec::Spec;

/// A built spec, ready to validate values.
#[derive(Clone)]
pub struct Validator {
    inner: Arc<ValidatorInner>,
}

struct ValidatorInner {
    name: Option<String>,
    spec: Spec,
}

impl Validator {
    /// Build an unnamed validator.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] if the spec contains an empty combinator or an
    /// object spec with a duplicate or empty field name.
    pub fn new(spec: impl Into<Spec>) -> Result<Self, SpecError> {
        Self::build(None, spec.into())
    }

    /// Build a validator whose failures are reported under `name`.
    ///
    /// # Errors
    ///
    /// Same as [`Validator::new`].
    pub fn named(name: impl Into<String>, spec: impl Into<Spec>) -> Result<Self, SpecError> {
        Self::build(Some(name.into()), spec.into())
    }

    fn build(name: Option<String>, spec: Spec) -> Result<Self, SpecError> {
        spec.verify(&FieldPath::root(name.as_deref()))?;
        Ok(Self {
            inner: Arc::new(ValidatorInner { name, spec }),
        })
    }

    /// The validator's name, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// Name shown when this validator appears inside another spec's message.
    pub fn display_name(&self) -> &str {
        self.name().filter(|n| !n.is_empty()).unwrap_or("Spec")
    }

    /// The spec this validator checks.
    pub fn spec(&self) -> &Spec {
        &self.inner.spec
    }

    /// Validate `value`, returning the normalized value or every failure.
    ///
    /// The normalized value has the input's shape with defaults applied and
    /// undeclared object keys removed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationFailure`] listing every failure in declaration
    /// order.
    pub async fn validate(&self, value: &Value) -> Result<Value, ValidationFailure> {
        debug!(validator = self.display_name(), "validating");
        let path = FieldPath::root(self.name());
        match check(&self.inner.spec, Some(value), path).await {
            Ok(resolved) => Ok(resolved.into_value().unwrap_or(Value::Null)),
            Err(errors) => {
                debug!(
                    validator = self.display_name(),
                    errors = errors.len(),
                    "validation failed"
                );
                Err(ValidationFailure::new(self.name(), errors))
            }
        }
    }

    /// Same as [`Validator::validate`], driven to completion on the current
    /// thread.
    ///
    /// Custom predicates that wait on a specific runtime (timers, sockets)
    /// need that runtime's context; use [`Validator::validate`] there.
    pub fn validate_blocking(&self, value: &Value) -> Result<Value, ValidationFailure> {
        futures::executor::block_on(self.validate(value))
    }

    /// Callback form of [`Validator::validate`]. `callback` runs exactly once.
    pub async fn validate_with<F>(&self, value: &Value, callback: F)
    where
        F: FnOnce(Result<Value, ValidationFailure>),
    {
        callback(self.validate(value).await);
    }

    /// Run nested inside another spec at the parent's `path`.
    pub(crate) async fn check_at(&self, value: Option<&Value>, path: FieldPath) -> Outcome {
        check(&self.inner.spec, value, path).await
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("name", &self.inner.name)
            .field("spec", &self.inner.spec)
            .finish()
    }
}
