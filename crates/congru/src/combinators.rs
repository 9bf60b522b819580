//! # Predicate Combinators
//!
//! Constructor functions for every [`Template`] variant. These are the
//! public vocabulary for building templates by hand:
//!
//! ```
//! use congru::{object, optional, is_string, array_bounded, choice, validate};
//! use serde_json::json;
//!
//! let template = object([
//!     ("name", is_string()),
//!     ("role", choice(["admin", "member"])),
//!     ("tags", array_bounded(is_string(), 0, 8)),
//!     ("nickname", optional(is_string())),
//! ]);
//!
//! assert!(validate(&template, &json!({
//!     "name": "ada",
//!     "role": "admin",
//!     "tags": ["ops"],
//! })).is_ok());
//! ```
//!
//! Quantifiers with bounds get explicit constructors (`array`,
//! `array_min`, `array_bounded`) rather than optional arguments; the
//! unbounded form is the common case.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::template::{Template, ValueKind};

// ─── Presence ────────────────────────────────────────────────────────

/// Key may be absent from the enclosing object; if present, the value
/// must match `inner`.
pub fn optional(inner: Template) -> Template {
    Template::Optional(Box::new(inner))
}

/// Value must be present; `null` matches unconditionally, anything else
/// must match `inner`.
pub fn nullable(inner: Template) -> Template {
    Template::Nullable(Box::new(inner))
}

/// Any present value matches, regardless of content.
pub fn exists() -> Template {
    Template::Exists
}

// ─── Objects ─────────────────────────────────────────────────────────

/// Object template in exact mode: the candidate's key set must carry no
/// keys outside `fields`, and every non-optional field must be present.
pub fn object<K, I>(fields: I) -> Template
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Template)>,
{
    Template::Object {
        fields: collect_fields(fields),
        loose: false,
    }
}

/// Object template in loose mode: extra candidate keys are tolerated,
/// missing non-optional fields still fail.
pub fn object_loose<K, I>(fields: I) -> Template
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Template)>,
{
    Template::Object {
        fields: collect_fields(fields),
        loose: true,
    }
}

fn collect_fields<K, I>(fields: I) -> BTreeMap<String, Template>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Template)>,
{
    fields
        .into_iter()
        .map(|(key, template)| (key.into(), template))
        .collect()
}

// ─── Quantifiers ─────────────────────────────────────────────────────

/// Array of any length whose every element matches `inner`.
pub fn array(inner: Template) -> Template {
    Template::Array {
        inner: Box::new(inner),
        min: 0,
        max: None,
    }
}

/// Array with at least `min` elements, each matching `inner`.
pub fn array_min(inner: Template, min: usize) -> Template {
    Template::Array {
        inner: Box::new(inner),
        min,
        max: None,
    }
}

/// Array with `min ..= max` elements, each matching `inner`.
pub fn array_bounded(inner: Template, min: usize, max: usize) -> Template {
    Template::Array {
        inner: Box::new(inner),
        min,
        max: Some(max),
    }
}

/// Array matched positionally: same length as `parts`, element `i`
/// against template `i`.
pub fn sequence<I>(parts: I) -> Template
where
    I: IntoIterator<Item = Template>,
{
    Template::Sequence(parts.into_iter().collect())
}

/// Plain map of any size whose every value matches `inner`; keys are
/// unconstrained.
pub fn map_of(inner: Template) -> Template {
    Template::MapOf {
        inner: Box::new(inner),
        min: 0,
        max: None,
    }
}

/// Plain map with at least `min` entries, each value matching `inner`.
pub fn map_min(inner: Template, min: usize) -> Template {
    Template::MapOf {
        inner: Box::new(inner),
        min,
        max: None,
    }
}

/// Plain map with `min ..= max` entries, each value matching `inner`.
pub fn map_bounded(inner: Template, min: usize, max: usize) -> Template {
    Template::MapOf {
        inner: Box::new(inner),
        min,
        max: Some(max),
    }
}

// ─── Logical composition ─────────────────────────────────────────────

/// All parts must match, evaluated in order, stopping at the first
/// failure. Vacuously true when empty.
pub fn all_of<I>(parts: I) -> Template
where
    I: IntoIterator<Item = Template>,
{
    Template::All(parts.into_iter().collect())
}

/// At least one part must match, evaluated in order, stopping at the
/// first success. Always false when empty.
pub fn any_of<I>(parts: I) -> Template
where
    I: IntoIterator<Item = Template>,
{
    Template::Any(parts.into_iter().collect())
}

// ─── Leaves ──────────────────────────────────────────────────────────

/// Value must equal one of `options` by value equality. An empty option
/// set matches nothing.
pub fn choice<T, I>(options: I) -> Template
where
    T: Into<Value>,
    I: IntoIterator<Item = T>,
{
    Template::Choice(options.into_iter().map(Into::into).collect())
}

/// Value must equal `literal` exactly.
pub fn equals(literal: impl Into<Value>) -> Template {
    Template::Equals(literal.into())
}

/// Value must be a JSON string.
pub fn is_string() -> Template {
    Template::Kind(ValueKind::String)
}

/// Value must be a JSON number (integral or not).
pub fn is_number() -> Template {
    Template::Kind(ValueKind::Number)
}

/// Value must be an integral JSON number.
pub fn is_integer() -> Template {
    Template::Kind(ValueKind::Integer)
}

/// Value must be a JSON boolean.
pub fn is_boolean() -> Template {
    Template::Kind(ValueKind::Boolean)
}

/// Value must be JSON `null`.
pub fn is_null() -> Template {
    Template::Kind(ValueKind::Null)
}

/// Value must be an ISO-8601 timestamp of the shape
/// `YYYY-MM-DDTHH:MM:SS.mmmZ`, optionally followed by a `±HH:MM` offset.
pub fn is_iso_date() -> Template {
    Template::IsoDate
}

/// User-supplied predicate. `label` is the name shown in rendered
/// signatures and mismatch reports.
///
/// The predicate must be pure: a function of its argument with no hidden
/// state, since the engine is free to re-evaluate it.
pub fn predicate<F>(label: impl Into<String>, test: F) -> Template
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Template::Custom {
        label: label.into(),
        test: Arc::new(test),
    }
}
