//! # Dispatch
//!
//! `check` is the single recursion point of the engine. It matches on the
//! spec variant and hands the value to the matcher for that variant.
//!
//! The returned future is boxed: specs nest arbitrarily deep, and every
//! nested level goes back through here.

use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::Value;

use blazon_core::{FieldPath, Outcome};

use crate::combinator;
use crate::object::check_object;
use crate::primitive::{match_instance, match_primitive};
use crate::spec::Spec;

/// Validate `value` against `spec` at `path`.
pub(crate) fn check<'a>(
    spec: &'a Spec,
    value: Option<&'a Value>,
    path: FieldPath,
) -> BoxFuture<'a, Outcome> {
    async move {
        match spec {
            Spec::Validator(validator) => validator.check_at(value, path).await,
            Spec::Required(inner) => combinator::required(inner, value, path).await,
            Spec::Maybe { spec, default } => {
                combinator::maybe(spec, default.as_ref(), value, path).await
            }
            Spec::Custom(custom) => combinator::custom(custom, value, path).await,
            Spec::And(specs) => combinator::and(specs, value, path).await,
            Spec::Or(specs) => combinator::or(specs, value, path).await,
            Spec::Primitive(primitive) => match_primitive(*primitive, value, &path),
            Spec::Instance(kind) => match_instance(*kind, value, &path),
            Spec::Object(object) => check_object(object, value, path).await,
        }
    }
    .boxed()
}
