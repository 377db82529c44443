//! # Object Matcher
//!
//! Matches an object spec against an input object one declared field at a
//! time. Every field is checked, even after a sibling fails, so a single pass
//! reports all broken fields.
//!
//! ## Output Map
//!
//! The output is a fresh map built from the children's results once they
//! have all settled. A field is written when:
//!
//! - the key was present in the input (explicit `null`, `false`, `0`, `""`
//!   are kept), or
//! - the result is truthy, or a default supplied by `Maybe`.
//!
//! A genuinely absent optional field therefore stays absent. Defaults are
//! unwrapped before they are stored. Input keys the spec does not declare
//! are not copied.

use serde_json::{Map, Value};
use tracing::trace;

use blazon_core::{describe, ErrorEntry, FieldPath, Outcome, Resolved};

use crate::aggregate::settle_all;
use crate::check::check;
use crate::spec::ObjectSpec;

pub(crate) async fn check_object(
    spec: &ObjectSpec,
    data: Option<&Value>,
    path: FieldPath,
) -> Outcome {
    let input = match data {
        Some(Value::Object(map)) => map,
        other => {
            return Err(vec![ErrorEntry::at(
                &path,
                format!(
                    "{} should be an Object, but saw `{}`",
                    path.subject(),
                    describe(other)
                ),
            )]);
        }
    };

    trace!(path = %path, fields = spec.len(), "checking object");

    let tasks = spec
        .fields()
        .map(|(key, field_spec)| check(field_spec, input.get(key), path.child(key)))
        .collect::<Vec<_>>();
    let results = settle_all(tasks).await?;

    let mut output = Map::new();
    for ((key, _), resolved) in spec.fields().zip(results) {
        if !resolved.is_substantive() && !input.contains_key(key) {
            continue;
        }
        if let Some(value) = resolved.into_value() {
            output.insert(key.to_string(), value);
        }
    }
    Ok(Resolved::Value(Value::Object(output)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;

    use crate::spec::Spec;

    fn object(spec: Spec) -> ObjectSpec {
        match spec {
            Spec::Object(object) => object,
            other => panic!("expected object spec, got {other:?}"),
        }
    }

    fn root() -> FieldPath {
        FieldPath::root(Some("User"))
    }

    #[test]
    fn test_rejects_non_objects() {
        let spec = object(Spec::object([("name", Spec::string())]));
        for data in [json!(null), json!("bob"), json!([1])] {
            let errors = block_on(check_object(&spec, Some(&data), root())).unwrap_err();
            assert_eq!(errors.len(), 1);
            assert!(errors[0].message.starts_with("User should be an Object"));
            assert_eq!(errors[0].path.as_deref(), Some("User"));
        }
    }

    #[test]
    fn test_rejects_absent() {
        let spec = object(Spec::object([("name", Spec::string())]));
        let errors = block_on(check_object(&spec, None, root())).unwrap_err();
        assert_eq!(
            errors[0].message,
            "User should be an Object, but saw `undefined`"
        );
    }

    #[test]
    fn test_collects_every_field_failure() {
        let spec = object(Spec::object([("name", Spec::string()), ("age", Spec::number())]));
        let data = json!({ "name": 123, "age": null });
        let errors = block_on(check_object(&spec, Some(&data), root())).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ErrorEntry::new(Some("User.name"), "name must be a String, but saw `123`"),
                ErrorEntry::new(Some("User.age"), "age must be a Number, but saw `null`"),
            ]
        );
    }

    #[test]
    fn test_output_drops_undeclared_keys() {
        let spec = object(Spec::object([("name", Spec::string())]));
        let data = json!({ "name": "bob", "admin": true });
        assert_eq!(
            block_on(check_object(&spec, Some(&data), root())),
            Ok(Resolved::Value(json!({ "name": "bob" })))
        );
    }

    #[test]
    fn test_output_keeps_present_falsy_and_omits_absent() {
        let spec = object(Spec::object([
            ("flag", Spec::maybe(Spec::boolean())),
            ("note", Spec::maybe(Spec::string())),
            ("count", Spec::maybe(Spec::number())),
        ]));
        let data = json!({ "flag": false, "count": null });
        assert_eq!(
            block_on(check_object(&spec, Some(&data), root())),
            Ok(Resolved::Value(json!({ "flag": false, "count": null })))
        );
    }

    #[test]
    fn test_output_unwraps_defaults() {
        let spec = object(Spec::object([
            ("role", Spec::maybe_or(Spec::string(), json!("member"))),
            ("limit", Spec::maybe_or(Spec::number(), json!(0))),
        ]));
        let data = json!({});
        assert_eq!(
            block_on(check_object(&spec, Some(&data), root())),
            Ok(Resolved::Value(json!({ "role": "member", "limit": 0 })))
        );
    }

    #[test]
    fn test_nested_paths() {
        let spec = object(Spec::object([(
            "address",
            Spec::object([("city", Spec::string())]),
        )]));
        let data = json!({ "address": { "city": 7 } });
        let errors = block_on(check_object(&spec, Some(&data), root())).unwrap_err();
        assert_eq!(errors[0].path.as_deref(), Some("User.address.city"));
    }
}
