//! # Template Normalizer
//!
//! Converts literal JSON structures into [`Template`] trees, so a nested
//! expected shape can be written as plain data instead of wrapping every
//! level by hand:
//!
//! ```
//! use congru::{recursive_object, validate};
//! use serde_json::json;
//!
//! let template = recursive_object(&json!({
//!     "user": {"name": "ada", "roles": ["admin"]},
//! })).unwrap();
//!
//! assert!(validate(&template, &json!({
//!     "user": {"name": "ada", "roles": ["admin"]},
//! })).is_ok());
//! ```
//!
//! The transformation is total and structurally recursive: objects become
//! exact [`Template::Object`]s, arrays become positional
//! [`Template::Sequence`]s (same length, element-by-element), and scalars
//! become [`Template::Equals`] leaves. Mixing literals with predicate
//! templates is done by composition: build the literal subtree with
//! [`literal`] and place it as a field of [`crate::object`].

use serde_json::Value;

use crate::error::TemplateError;
use crate::template::{Template, ValueKind};

/// Normalize a literal JSON object into an exact-mode template.
///
/// Every nested object requires an identical key set, every nested array
/// is matched positionally, and every scalar must compare equal.
///
/// # Errors
///
/// Returns [`TemplateError::RootNotObject`] if `template` is not a JSON
/// object. A non-object root is a programming error, rejected at
/// construction rather than surfacing as a confusing mismatch later.
pub fn recursive_object(template: &Value) -> Result<Template, TemplateError> {
    rooted(template, false)
}

/// Normalize a literal JSON object into a loose-mode template: every
/// nested object tolerates extra candidate keys.
///
/// # Errors
///
/// Returns [`TemplateError::RootNotObject`] if `template` is not a JSON
/// object.
pub fn recursive_object_loose(template: &Value) -> Result<Template, TemplateError> {
    rooted(template, true)
}

fn rooted(template: &Value, loose: bool) -> Result<Template, TemplateError> {
    match template {
        Value::Object(_) => Ok(normalize(template, loose)),
        other => Err(TemplateError::RootNotObject(ValueKind::of(other))),
    }
}

/// Normalize any literal JSON value into an exact template. Total: never
/// fails, accepts scalars and arrays at the root.
pub fn literal(value: &Value) -> Template {
    normalize(value, false)
}

/// Structural recursion over the value tree. `loose` applies to every
/// object level, mirroring the flag on the entry points.
fn normalize(value: &Value, loose: bool) -> Template {
    match value {
        Value::Object(map) => Template::Object {
            fields: map
                .iter()
                .map(|(key, nested)| (key.clone(), normalize(nested, loose)))
                .collect(),
            loose,
        },
        Value::Array(items) => {
            Template::Sequence(items.iter().map(|item| normalize(item, loose)).collect())
        }
        scalar => Template::Equals(scalar.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{validate, Mismatch};
    use serde_json::json;

    #[test]
    fn test_root_must_be_object() {
        for bad in [json!([1, 2]), json!("x"), json!(5), json!(null), json!(true)] {
            let err = recursive_object(&bad).unwrap_err();
            assert!(matches!(err, TemplateError::RootNotObject(_)));
        }
    }

    #[test]
    fn test_root_error_names_the_kind() {
        let err = recursive_object(&json!([1])).unwrap_err();
        assert_eq!(err, TemplateError::RootNotObject(ValueKind::Array));
    }

    #[test]
    fn test_scalars_become_equals_leaves() {
        let template = recursive_object(&json!({"a": 1, "b": "x"})).unwrap();
        assert!(template.matches(&json!({"a": 1, "b": "x"})));
        assert!(!template.matches(&json!({"a": 2, "b": "x"})));
    }

    #[test]
    fn test_nested_objects_normalize_recursively() {
        let template = recursive_object(&json!({"a": {"b": 1}})).unwrap();
        assert!(validate(&template, &json!({"a": {"b": 1}})).is_ok());
        let err = validate(&template, &json!({"a": {"b": 2}})).unwrap_err();
        match err {
            Mismatch::Value { path, actual, .. } => {
                assert_eq!(path, "/a/b");
                assert_eq!(actual, json!(2));
            }
            other => panic!("expected Value, got {other:?}"),
        }
    }

    #[test]
    fn test_arrays_match_positionally_with_exact_length() {
        let template = recursive_object(&json!({"xs": [1, 2, 3]})).unwrap();
        assert!(template.matches(&json!({"xs": [1, 2, 3]})));
        assert!(!template.matches(&json!({"xs": [1, 2]})));
        assert!(!template.matches(&json!({"xs": [1, 2, 3, 4]})));
        assert!(!template.matches(&json!({"xs": [1, 2, 4]})));
        assert!(!template.matches(&json!({"xs": {"0": 1, "1": 2, "2": 3}})));
    }

    #[test]
    fn test_loose_applies_to_every_object_level() {
        let template = recursive_object_loose(&json!({"a": {"b": 1}})).unwrap();
        assert!(template.matches(&json!({"a": {"b": 1, "extra": true}, "more": 0})));
        // Missing keys still fail, loose or not.
        assert!(!template.matches(&json!({"a": {}})));
    }

    #[test]
    fn test_literal_is_total() {
        assert!(literal(&json!(5)).matches(&json!(5)));
        assert!(literal(&json!([1, "x"])).matches(&json!([1, "x"])));
        assert!(literal(&json!(null)).matches(&json!(null)));
        assert!(!literal(&json!(null)).matches(&json!(0)));
    }

    #[test]
    fn test_literal_composes_with_predicate_fields() {
        use crate::combinators::{is_string, object};
        let template = object([
            ("name", is_string()),
            ("origin", literal(&json!({"lat": 0, "lon": 0}))),
        ]);
        assert!(template.matches(&json!({"name": "null island", "origin": {"lat": 0, "lon": 0}})));
        assert!(!template.matches(&json!({"name": "elsewhere", "origin": {"lat": 1, "lon": 0}})));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for arbitrary JSON values (floats excluded so equality
    /// stays exact across the json! roundtrip).
    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| serde_json::json!(n)),
            "[a-zA-Z0-9_ ]{0,20}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 48, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,8}", inner, 0..6).prop_map(|m| {
                    Value::Object(m.into_iter().collect())
                }),
            ]
        })
    }

    proptest! {
        /// A value always matches the template normalized from itself.
        #[test]
        fn normalized_template_matches_its_source(value in json_value()) {
            prop_assert!(literal(&value).matches(&value));
        }

        /// Normalization and matching are deterministic.
        #[test]
        fn matching_is_deterministic(value in json_value()) {
            let template = literal(&value);
            prop_assert_eq!(template.matches(&value), template.matches(&value));
        }

        /// Rendered signatures are deterministic.
        #[test]
        fn describe_is_deterministic(value in json_value()) {
            let template = literal(&value);
            prop_assert_eq!(template.describe(), template.describe());
        }

        /// The object-rooted entry accepts exactly the object roots.
        #[test]
        fn recursive_object_accepts_only_objects(value in json_value()) {
            let outcome = recursive_object(&value);
            prop_assert_eq!(outcome.is_ok(), value.is_object());
        }
    }
}
