//! # Combinators
//!
//! `Required`, `Maybe`, `Custom`, `And` and `Or` wrap other specs and add one
//! rule each. They all take the value under test and its path and resolve
//! to an [`Outcome`].
//!
//! `And` reports every failing branch. On success its branch results are
//! folded in declaration order. Results of object specs deep-merge into the
//! result so far with later keys winning. Any other result replaces it.
//!
//! `Maybe` and `Or` collapse their branch failures into one message naming
//! what was expected, so a field typed `Or(String, Number)` fails with one
//! line rather than two.

use serde_json::{Map, Value};
use tracing::trace;

use blazon_core::{describe, ErrorEntry, FieldPath, Outcome, Resolved};

use crate::aggregate::{first_success, settle_all};
use crate::check::check;
use crate::spec::{Custom, Spec};

/// Absent and `null` are both "no value" to `Required` and `Maybe`.
fn is_missing(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

pub(crate) async fn required(spec: &Spec, value: Option<&Value>, path: FieldPath) -> Outcome {
    if is_missing(value) {
        return Err(vec![ErrorEntry::at(
            &path,
            format!("{} is required.", path.subject()),
        )]);
    }
    check(spec, value, path).await
}

pub(crate) async fn maybe(
    spec: &Spec,
    default: Option<&Value>,
    value: Option<&Value>,
    path: FieldPath,
) -> Outcome {
    if is_missing(value) {
        return Ok(match default {
            Some(fallback) => Resolved::Default(fallback.clone()),
            None => Resolved::from_input(value),
        });
    }
    match check(spec, value, path.clone()).await {
        Ok(resolved) => Ok(resolved),
        Err(_) => Err(vec![ErrorEntry::at(
            &path,
            format!(
                "{} must be a {} or null, but saw `{}`",
                path.subject(),
                spec.type_name(),
                describe(value)
            ),
        )]),
    }
}

pub(crate) async fn custom(custom: &Custom, value: Option<&Value>, path: FieldPath) -> Outcome {
    match custom.call(path, value.cloned()).await {
        Ok(Some(v)) => Ok(Resolved::Value(v)),
        Ok(None) => Ok(Resolved::Absent),
        Err(entry) => Err(vec![entry]),
    }
}

pub(crate) async fn and(specs: &[Spec], value: Option<&Value>, path: FieldPath) -> Outcome {
    let tasks = specs
        .iter()
        .map(|spec| check(spec, value, path.clone()))
        .collect::<Vec<_>>();
    let results = settle_all(tasks).await?;
    Ok(specs
        .iter()
        .zip(results)
        .fold(None, |acc, (spec, next)| Some(compose(acc, spec, next)))
        .unwrap_or_else(|| Resolved::from_input(value)))
}

/// Fold the next `And` branch result onto the ones before it.
fn compose(acc: Option<Resolved>, spec: &Spec, next: Resolved) -> Resolved {
    match (acc, next) {
        (Some(Resolved::Value(Value::Object(mut base))), Resolved::Value(Value::Object(over)))
            if spec.builds_object() =>
        {
            merge_into(&mut base, over);
            Resolved::Value(Value::Object(base))
        }
        (_, next) => next,
    }
}

fn merge_into(base: &mut Map<String, Value>, over: Map<String, Value>) {
    for (key, value) in over {
        match (base.get_mut(&key), value) {
            (Some(Value::Object(inner)), Value::Object(nested)) => merge_into(inner, nested),
            (Some(slot), value) => *slot = value,
            (None, value) => {
                base.insert(key, value);
            }
        }
    }
}

pub(crate) async fn or(specs: &[Spec], value: Option<&Value>, path: FieldPath) -> Outcome {
    let tasks = specs
        .iter()
        .map(|spec| check(spec, value, path.clone()))
        .collect::<Vec<_>>();
    if let Some(resolved) = first_success(tasks).await {
        return Ok(resolved);
    }
    trace!(path = %path, branches = specs.len(), "no Or branch matched");
    let names = specs
        .iter()
        .map(Spec::type_name)
        .collect::<Vec<_>>()
        .join(" or ");
    Err(vec![ErrorEntry::at(
        &path,
        format!(
            "{} must be a {names}, but saw `{}`",
            path.subject(),
            describe(value)
        ),
    )])
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;

    fn field(name: &str) -> FieldPath {
        FieldPath::root(Some("data")).child(name)
    }

    fn non_empty() -> Spec {
        Spec::custom_sync(|path, value| match value {
            Some(v) if blazon_core::is_truthy(v) => Ok(Some(v.clone())),
            _ => Err(ErrorEntry::at(
                path,
                format!("{} must be a non-empty-string", path.subject()),
            )),
        })
    }

    #[test]
    fn test_required_rejects_null_and_absent() {
        for value in [None, Some(&Value::Null)] {
            let errors = block_on(required(&Spec::number(), value, field("age"))).unwrap_err();
            assert_eq!(
                errors,
                vec![ErrorEntry::new(Some("data.age"), "age is required.")]
            );
        }
    }

    #[test]
    fn test_required_delegates() {
        let value = json!(123);
        let errors = block_on(required(&Spec::string(), Some(&value), field("name"))).unwrap_err();
        assert_eq!(errors[0].message, "name must be a String, but saw `123`");
    }

    #[test]
    fn test_maybe_passes_missing_through() {
        assert_eq!(
            block_on(maybe(&Spec::string(), None, None, field("value"))),
            Ok(Resolved::Absent)
        );
        assert_eq!(
            block_on(maybe(&Spec::string(), None, Some(&Value::Null), field("value"))),
            Ok(Resolved::Value(Value::Null))
        );
    }

    #[test]
    fn test_maybe_default() {
        let fallback = json!("anonymous");
        assert_eq!(
            block_on(maybe(&Spec::string(), Some(&fallback), None, field("value"))),
            Ok(Resolved::Default(json!("anonymous")))
        );
    }

    #[test]
    fn test_maybe_collapses_errors() {
        let value = json!(123);
        let errors =
            block_on(maybe(&Spec::string(), None, Some(&value), field("value"))).unwrap_err();
        assert_eq!(
            errors,
            vec![ErrorEntry::new(
                Some("data.value"),
                "value must be a String or null, but saw `123`"
            )]
        );
    }

    #[test]
    fn test_and_reports_only_failing_branches() {
        let specs = [Spec::string(), non_empty()];
        let value = json!(123);
        let errors = block_on(and(&specs, Some(&value), field("name"))).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "name must be a String, but saw `123`");

        let value = json!("");
        let errors = block_on(and(&specs, Some(&value), field("name"))).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "name must be a non-empty-string");
    }

    #[test]
    fn test_and_reports_every_failure() {
        let specs = [Spec::string(), non_empty()];
        let errors = block_on(and(&specs, Some(&json!(0)), field("name"))).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_and_returns_last_result() {
        let trim = Spec::custom_sync(|_, value| {
            Ok(value.and_then(Value::as_str).map(|s| json!(s.trim())))
        });
        let specs = [Spec::string(), trim];
        let value = json!("  bob  ");
        assert_eq!(
            block_on(and(&specs, Some(&value), field("name"))),
            Ok(Resolved::Value(json!("bob")))
        );
    }

    #[test]
    fn test_and_merges_object_branches() {
        let specs = [
            Spec::object([("name", Spec::string())]),
            Spec::object([("age", Spec::number())]),
        ];
        let value = json!({ "name": "bob", "age": 3, "extra": true });
        assert_eq!(
            block_on(and(&specs, Some(&value), field("user"))),
            Ok(Resolved::Value(json!({ "name": "bob", "age": 3 })))
        );
    }

    #[test]
    fn test_and_merges_nested_objects() {
        let specs = [
            Spec::object([("address", Spec::object([("city", Spec::string())]))]),
            Spec::object([("address", Spec::object([("zip", Spec::string())]))]),
        ];
        let value = json!({ "address": { "city": "Oslo", "zip": "0150" } });
        assert_eq!(
            block_on(and(&specs, Some(&value), field("user"))),
            Ok(Resolved::Value(json!({ "address": { "city": "Oslo", "zip": "0150" } })))
        );
    }

    #[test]
    fn test_and_non_object_result_replaces() {
        let count = Spec::custom_sync(|_, value| {
            Ok(value.and_then(Value::as_object).map(|m| json!(m.len())))
        });
        let specs = [Spec::object([("name", Spec::string())]), count];
        let value = json!({ "name": "bob", "age": 3 });
        assert_eq!(
            block_on(and(&specs, Some(&value), field("user"))),
            Ok(Resolved::Value(json!(2)))
        );
    }

    #[test]
    fn test_or_first_declared_success_wins() {
        let upper = Spec::custom_sync(|_, value| {
            Ok(value.and_then(Value::as_str).map(|s| json!(s.to_uppercase())))
        });
        let specs = [Spec::number(), upper, Spec::string()];
        let value = json!("abc");
        assert_eq!(
            block_on(or(&specs, Some(&value), field("value"))),
            Ok(Resolved::Value(json!("ABC")))
        );
    }

    #[test]
    fn test_or_single_combined_message() {
        let specs = [Spec::string(), Spec::number()];
        let errors =
            block_on(or(&specs, Some(&Value::Null), field("value"))).unwrap_err();
        assert_eq!(
            errors,
            vec![ErrorEntry::new(
                Some("data.value"),
                "value must be a String or Number, but saw `null`"
            )]
        );
    }

    #[test]
    fn test_custom_absent_result() {
        let spec = Custom::from_fn(|_, _| Ok(None));
        assert_eq!(
            block_on(custom(&spec, Some(&json!(1)), field("x"))),
            Ok(Resolved::Absent)
        );
    }
}
