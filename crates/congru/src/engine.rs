//! # Congruence Engine
//!
//! Walks a [`Template`] and a candidate [`Value`] in lockstep and decides
//! structural congruence: same key set, every value satisfying its
//! template. The walk short-circuits on the first mismatch and returns it
//! as a [`Mismatch`] value; nothing is stored anywhere, so concurrent
//! validations against a shared template cannot race.
//!
//! ## Key-Set Policy
//!
//! The key-set check runs before any per-value check. Keys wrapped in
//! `Optional` are not required. In exact mode both missing required keys
//! and extra candidate keys fail; in loose mode only extra keys are
//! tolerated. Missing keys are never tolerated, loose or not. This
//! asymmetry is deliberate and must not be symmetrized.
//!
//! ## Paths
//!
//! Mismatches carry a JSON-pointer-style instance path (`/a/b`, `/items/0`)
//! so a failure deep inside a nested template names the exact location,
//! empty at the root.

use serde_json::Value;
use tracing::{debug, trace};

use crate::datetime::is_iso_datetime;
use crate::template::Template;

/// Why a validation call failed. At most one is produced per call: the
/// first mismatch found, innermost for nested templates.
#[derive(Debug, Clone)]
pub enum Mismatch {
    /// The candidate object's key set is not congruent with the template's.
    KeySet {
        /// Instance path of the object whose keys mismatched.
        path: String,
        /// All keys the template declares.
        expected: Vec<String>,
        /// All keys the candidate carries.
        actual: Vec<String>,
        /// Required template keys absent from the candidate.
        missing: Vec<String>,
        /// Candidate keys the template does not declare.
        unexpected: Vec<String>,
    },
    /// A present value failed its template leaf.
    Value {
        /// Instance path of the offending value.
        path: String,
        /// The template the value was expected to satisfy.
        expected: Template,
        /// The offending value.
        actual: Value,
    },
    /// An object template met a non-object candidate.
    NotAnObject {
        /// Instance path where an object was required.
        path: String,
        /// The non-object value found there.
        actual: Value,
    },
}

impl Mismatch {
    /// JSON-pointer-style path to the mismatch, empty at the root.
    pub fn path(&self) -> &str {
        match self {
            Self::KeySet { path, .. } | Self::Value { path, .. } | Self::NotAnObject { path, .. } => {
                path
            }
        }
    }
}

/// Check `candidate` against `template`, returning the first mismatch.
///
/// Success is `Ok(())`. Failure returns a [`Mismatch`] describing the
/// first incongruence found; render it with `to_string()` for a
/// human-readable report. Validation is pure and always terminates:
/// recursion depth is bounded by the template's nesting depth.
///
/// The typical top-level template is an `Object`, in which case a
/// non-object candidate fails with [`Mismatch::NotAnObject`] at the
/// root path.
pub fn validate(template: &Template, candidate: &Value) -> Result<(), Mismatch> {
    trace!(template = %template, "validating candidate");
    let outcome = check(template, candidate, "");
    if let Err(mismatch) = &outcome {
        debug!(%mismatch, "validation failed");
    }
    outcome
}

/// Recursive congruence check for a present value at `path`.
pub(crate) fn check(template: &Template, value: &Value, path: &str) -> Result<(), Mismatch> {
    match template {
        // Presence is the enclosing object's concern; a present value
        // just delegates.
        Template::Optional(inner) => check(inner, value, path),
        Template::Nullable(inner) => {
            if value.is_null() {
                Ok(())
            } else {
                check(inner, value, path)
            }
        }
        Template::Exists => Ok(()),
        Template::Kind(kind) => {
            if kind.admits(value) {
                Ok(())
            } else {
                Err(value_mismatch(template, value, path))
            }
        }
        Template::Equals(literal) => {
            if value == literal {
                Ok(())
            } else {
                Err(value_mismatch(template, value, path))
            }
        }
        Template::Choice(options) => {
            if options.iter().any(|option| option == value) {
                Ok(())
            } else {
                Err(value_mismatch(template, value, path))
            }
        }
        Template::All(parts) => {
            for part in parts {
                check(part, value, path)?;
            }
            Ok(())
        }
        Template::Any(parts) => {
            if parts.iter().any(|part| check(part, value, path).is_ok()) {
                Ok(())
            } else {
                // No single branch to blame; report the whole disjunction.
                Err(value_mismatch(template, value, path))
            }
        }
        Template::IsoDate => match value.as_str() {
            Some(s) if is_iso_datetime(s) => Ok(()),
            _ => Err(value_mismatch(template, value, path)),
        },
        Template::Custom { test, .. } => {
            if test(value) {
                Ok(())
            } else {
                Err(value_mismatch(template, value, path))
            }
        }
        Template::Array { inner, min, max } => check_array(template, inner, *min, *max, value, path),
        Template::MapOf { inner, min, max } => check_map_of(template, inner, *min, *max, value, path),
        Template::Sequence(parts) => check_sequence(template, parts, value, path),
        Template::Object { fields, loose } => check_object(fields, *loose, value, path),
    }
}

/// Quantified array check: length bounds, then every element.
fn check_array(
    whole: &Template,
    inner: &Template,
    min: usize,
    max: Option<usize>,
    value: &Value,
    path: &str,
) -> Result<(), Mismatch> {
    let items = match value.as_array() {
        Some(items) => items,
        None => return Err(value_mismatch(whole, value, path)),
    };
    if items.len() < min || max.is_some_and(|max| items.len() > max) {
        return Err(value_mismatch(whole, value, path));
    }
    for (index, item) in items.iter().enumerate() {
        check(inner, item, &child_path(path, &index.to_string()))?;
    }
    Ok(())
}

/// Quantified map check: entry-count bounds, then every value. Keys are
/// unconstrained.
fn check_map_of(
    whole: &Template,
    inner: &Template,
    min: usize,
    max: Option<usize>,
    value: &Value,
    path: &str,
) -> Result<(), Mismatch> {
    let entries = match value.as_object() {
        Some(entries) => entries,
        None => return Err(value_mismatch(whole, value, path)),
    };
    if entries.len() < min || max.is_some_and(|max| entries.len() > max) {
        return Err(value_mismatch(whole, value, path));
    }
    for (key, entry) in entries {
        check(inner, entry, &child_path(path, key))?;
    }
    Ok(())
}

/// Positional array check: identical length, element `i` against
/// template `i`.
fn check_sequence(
    whole: &Template,
    parts: &[Template],
    value: &Value,
    path: &str,
) -> Result<(), Mismatch> {
    let items = match value.as_array() {
        Some(items) => items,
        None => return Err(value_mismatch(whole, value, path)),
    };
    if items.len() != parts.len() {
        return Err(value_mismatch(whole, value, path));
    }
    for (index, (part, item)) in parts.iter().zip(items).enumerate() {
        check(part, item, &child_path(path, &index.to_string()))?;
    }
    Ok(())
}

/// Object congruence: key-set check first, then per-field checks in key
/// order. A key-set failure skips the field checks entirely.
fn check_object(
    fields: &std::collections::BTreeMap<String, Template>,
    loose: bool,
    value: &Value,
    path: &str,
) -> Result<(), Mismatch> {
    let object = match value.as_object() {
        Some(object) => object,
        None => {
            return Err(Mismatch::NotAnObject {
                path: path.to_string(),
                actual: value.clone(),
            })
        }
    };

    let missing: Vec<String> = fields
        .iter()
        .filter(|(key, field)| !field.is_optional() && !object.contains_key(*key))
        .map(|(key, _)| key.clone())
        .collect();
    let unexpected: Vec<String> = object
        .keys()
        .filter(|key| !fields.contains_key(*key))
        .cloned()
        .collect();

    // Missing keys fail in both modes; extra keys only in exact mode.
    if !missing.is_empty() || (!loose && !unexpected.is_empty()) {
        return Err(Mismatch::KeySet {
            path: path.to_string(),
            expected: fields.keys().cloned().collect(),
            actual: object.keys().cloned().collect(),
            missing,
            unexpected,
        });
    }

    for (key, field) in fields {
        match object.get(key) {
            Some(present) => check(field, present, &child_path(path, key))?,
            // Key-set check above guarantees only optional keys are absent.
            None => {}
        }
    }
    Ok(())
}

fn value_mismatch(template: &Template, value: &Value, path: &str) -> Mismatch {
    Mismatch::Value {
        path: path.to_string(),
        expected: template.clone(),
        actual: value.clone(),
    }
}

/// Extend a JSON-pointer path with one segment, escaping per RFC 6901.
fn child_path(path: &str, segment: &str) -> String {
    let escaped = segment.replace('~', "~0").replace('/', "~1");
    format!("{path}/{escaped}")
}
