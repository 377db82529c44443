//! # Specs
//!
//! A [`Spec`] describes the expected shape of a value. Specs are built from
//! primitive markers, object literals, combinators, and previously built
//! [`Validator`]s, and are immutable once built.
//!
//! ## Variants
//!
//! ```text
//! Spec
//!  ├── Primitive   String | Number | Boolean | Null   exact JSON variant
//!  ├── Instance    Array | Object                     any value of that kind
//!  ├── Object      ordered (field, Spec) pairs        recursive match
//!  ├── Required    absent/null rejected, then inner spec
//!  ├── Maybe       absent/null accepted (or defaulted), else inner spec
//!  ├── Custom      user predicate, may suspend
//!  ├── And         every branch must pass, last result wins
//!  ├── Or          first passing branch in declaration order wins
//!  └── Validator   a whole validator used as a leaf
//! ```
//!
//! Dispatch over the variants lives in `check.rs` and is an exhaustive
//! `match`, so adding a variant forces every consumer to handle it.

use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use blazon_core::{ErrorEntry, FieldPath, SpecError};

use crate::validator::Validator;

/// Built-in scalar type markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Primitive {
    /// A JSON string.
    String,
    /// A JSON number, integer or float.
    Number,
    /// `true` or `false`.
    Boolean,
    /// Exactly `null`.
    Null,
}

impl Primitive {
    /// Display name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::Null => "null",
        }
    }

    /// Whether `value` is exactly this kind.
    pub fn matches(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::String, Value::String(_))
                | (Self::Number, Value::Number(_))
                | (Self::Boolean, Value::Bool(_))
                | (Self::Null, Value::Null)
        )
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Container kinds accepted wholesale, without looking inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstanceKind {
    /// Any JSON array.
    Array,
    /// Any JSON object.
    Object,
}

impl InstanceKind {
    /// Display name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Array => "Array",
            Self::Object => "Object",
        }
    }

    /// Whether `value` is a container of this kind.
    pub fn matches(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::Array, Value::Array(_)) | (Self::Object, Value::Object(_))
        )
    }
}

/// Object literal spec: fields in declaration order.
#[derive(Debug, Clone, Default)]
pub struct ObjectSpec {
    fields: Vec<(String, Spec)>,
}

impl ObjectSpec {
    /// Build from `(field, spec)` pairs. Order is kept.
    pub fn new<K, S>(fields: impl IntoIterator<Item = (K, S)>) -> Self
    where
        K: Into<String>,
        S: Into<Spec>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(key, spec)| (key.into(), spec.into()))
                .collect(),
        }
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Spec)> {
        self.fields.iter().map(|(key, spec)| (key.as_str(), spec))
    }

    /// Spec declared for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&Spec> {
        self.fields
            .iter()
            .find(|(key, _)| key == field)
            .map(|(_, spec)| spec)
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// What a custom predicate reports: the (possibly transformed) value, or a
/// single failure entry. `Ok(None)` leaves the field absent.
pub type CustomResult = Result<Option<Value>, ErrorEntry>;

type Predicate = dyn Fn(FieldPath, Option<Value>) -> BoxFuture<'static, CustomResult> + Send + Sync;

/// User predicate wrapped as a spec.
#[derive(Clone)]
pub struct Custom {
    predicate: Arc<Predicate>,
}

impl Custom {
    /// Wrap an async predicate.
    pub fn new<F, Fut>(predicate: F) -> Self
    where
        F: Fn(FieldPath, Option<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CustomResult> + Send + 'static,
    {
        Self {
            predicate: Arc::new(move |path: FieldPath, value: Option<Value>| {
                predicate(path, value).boxed()
            }),
        }
    }

    /// Wrap a predicate that never suspends.
    pub fn from_fn<F>(predicate: F) -> Self
    where
        F: Fn(&FieldPath, Option<&Value>) -> CustomResult + Send + Sync + 'static,
    {
        Self::new(move |path, value| futures::future::ready(predicate(&path, value.as_ref())))
    }

    pub(crate) fn call(
        &self,
        path: FieldPath,
        value: Option<Value>,
    ) -> BoxFuture<'static, CustomResult> {
        (self.predicate)(path, value)
    }
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Custom(..)")
    }
}

/// Declarative description of an expected value.
#[derive(Debug, Clone)]
pub enum Spec {
    /// Built-in scalar marker.
    Primitive(Primitive),
    /// Container accepted without descending into it.
    Instance(InstanceKind),
    /// Object literal matched field by field.
    Object(ObjectSpec),
    /// Rejects absent and `null` values before checking the inner spec.
    Required(Box<Spec>),
    /// Accepts absent and `null` values, optionally substituting a default.
    Maybe {
        /// Spec a present value must satisfy.
        spec: Box<Spec>,
        /// Fallback for absent or `null` input.
        default: Option<Value>,
    },
    /// User predicate.
    Custom(Custom),
    /// Every branch must pass.
    And(Vec<Spec>),
    /// At least one branch must pass.
    Or(Vec<Spec>),
    /// A built validator used as a leaf.
    Validator(Validator),
}

impl Spec {
    /// Any JSON string.
    pub fn string() -> Self {
        Self::Primitive(Primitive::String)
    }

    /// Any JSON number.
    pub fn number() -> Self {
        Self::Primitive(Primitive::Number)
    }

    /// `true` or `false`.
    pub fn boolean() -> Self {
        Self::Primitive(Primitive::Boolean)
    }

    /// Exactly `null`.
    pub fn null() -> Self {
        Self::Primitive(Primitive::Null)
    }

    /// Any JSON array, contents unchecked.
    pub fn array() -> Self {
        Self::Instance(InstanceKind::Array)
    }

    /// Any JSON object, contents unchecked.
    pub fn any_object() -> Self {
        Self::Instance(InstanceKind::Object)
    }

    /// Object literal from `(field, spec)` pairs in declaration order.
    pub fn object<K, S>(fields: impl IntoIterator<Item = (K, S)>) -> Self
    where
        K: Into<String>,
        S: Into<Spec>,
    {
        Self::Object(ObjectSpec::new(fields))
    }

    /// Field must be present and not `null`.
    pub fn required(spec: impl Into<Spec>) -> Self {
        Self::Required(Box::new(spec.into()))
    }

    /// Field may be absent or `null`.
    pub fn maybe(spec: impl Into<Spec>) -> Self {
        Self::Maybe {
            spec: Box::new(spec.into()),
            default: None,
        }
    }

    /// Field may be absent or `null`, in which case `default` is used.
    pub fn maybe_or(spec: impl Into<Spec>, default: Value) -> Self {
        Self::Maybe {
            spec: Box::new(spec.into()),
            default: Some(default),
        }
    }

    /// Async user predicate.
    pub fn custom<F, Fut>(predicate: F) -> Self
    where
        F: Fn(FieldPath, Option<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CustomResult> + Send + 'static,
    {
        Self::Custom(Custom::new(predicate))
    }

    /// Synchronous user predicate.
    pub fn custom_sync<F>(predicate: F) -> Self
    where
        F: Fn(&FieldPath, Option<&Value>) -> CustomResult + Send + Sync + 'static,
    {
        Self::Custom(Custom::from_fn(predicate))
    }

    /// Conjunction of `specs`.
    pub fn and(specs: impl IntoIterator<Item = Spec>) -> Self {
        Self::And(specs.into_iter().collect())
    }

    /// Disjunction of `specs`.
    pub fn or(specs: impl IntoIterator<Item = Spec>) -> Self {
        Self::Or(specs.into_iter().collect())
    }

    /// Name of the spec as it appears in error messages.
    ///
    /// Object specs render as a JSON map from field to field type name,
    /// e.g. `{"name":"String"}`.
    pub fn type_name(&self) -> String {
        match self {
            Self::Primitive(p) => p.name().to_string(),
            Self::Instance(kind) => kind.name().to_string(),
            Self::Object(object) => {
                let names: serde_json::Map<String, Value> = object
                    .fields()
                    .map(|(key, spec)| (key.to_string(), Value::String(spec.type_name())))
                    .collect();
                Value::Object(names).to_string()
            }
            Self::Required(inner) | Self::Maybe { spec: inner, .. } => inner.type_name(),
            Self::Custom(_) => "Custom".to_string(),
            Self::And(specs) => join_names(specs, " and "),
            Self::Or(specs) => join_names(specs, " or "),
            Self::Validator(validator) => validator.display_name().to_string(),
        }
    }

    /// Whether this spec resolves to the object it rebuilt field by field.
    ///
    /// `And` merges such results across branches instead of replacing them.
    pub(crate) fn builds_object(&self) -> bool {
        match self {
            Self::Object(_) => true,
            Self::Required(spec) | Self::Maybe { spec, .. } => spec.builds_object(),
            Self::And(specs) => specs.last().is_some_and(Spec::builds_object),
            _ => false,
        }
    }

    /// Reject specs that cannot be validated against.
    ///
    /// Nested validators were verified when they were built and are skipped.
    pub(crate) fn verify(&self, path: &FieldPath) -> Result<(), SpecError> {
        match self {
            Self::Primitive(_) | Self::Instance(_) | Self::Custom(_) | Self::Validator(_) => Ok(()),
            Self::Required(inner) | Self::Maybe { spec: inner, .. } => inner.verify(path),
            Self::And(specs) => verify_branches("And", specs, path),
            Self::Or(specs) => verify_branches("Or", specs, path),
            Self::Object(object) => {
                let mut seen = HashSet::new();
                for (key, spec) in object.fields() {
                    if key.is_empty() {
                        return Err(SpecError::EmptyFieldName {
                            path: path.to_string(),
                        });
                    }
                    if !seen.insert(key) {
                        return Err(SpecError::DuplicateField {
                            field: key.to_string(),
                            path: path.to_string(),
                        });
                    }
                    spec.verify(&path.child(key))?;
                }
                Ok(())
            }
        }
    }
}

fn join_names(specs: &[Spec], separator: &str) -> String {
    specs
        .iter()
        .map(Spec::type_name)
        .collect::<Vec<_>>()
        .join(separator)
}

fn verify_branches(
    combinator: &'static str,
    specs: &[Spec],
    path: &FieldPath,
) -> Result<(), SpecError> {
    if specs.is_empty() {
        return Err(SpecError::EmptyCombinator {
            combinator,
            path: path.to_string(),
        });
    }
    specs.iter().try_for_each(|spec| spec.verify(path))
}

impl From<Primitive> for Spec {
    fn from(primitive: Primitive) -> Self {
        Self::Primitive(primitive)
    }
}

impl From<InstanceKind> for Spec {
    fn from(kind: InstanceKind) -> Self {
        Self::Instance(kind)
    }
}

impl From<ObjectSpec> for Spec {
    fn from(object: ObjectSpec) -> Self {
        Self::Object(object)
    }
}

impl From<Custom> for Spec {
    fn from(custom: Custom) -> Self {
        Self::Custom(custom)
    }
}

impl From<Validator> for Spec {
    fn from(validator: Validator) -> Self {
        Self::Validator(validator)
    }
}

impl From<&Validator> for Spec {
    fn from(validator: &Validator) -> Self {
        Self::Validator(validator.clone())
    }
}
