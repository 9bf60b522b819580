//! # Template Variant Type
//!
//! Defines [`Template`], the tagged representation of an expected shape.
//! Every combinator in this crate constructs one of these variants; the
//! congruence engine and the mismatch reporter both pattern-match over
//! the same type, so testing and rendering stay exhaustive by construction.
//!
//! ## Design Decision
//!
//! An earlier generation of this idea attached descriptive metadata (name
//! plus constructor arguments) onto bare predicate functions and read it
//! back off the function value at render time. Here each combinator is a
//! variant instead: the "signature" a mismatch report needs is recoverable
//! by matching on the variant, and a malformed template leaf is simply
//! unrepresentable. User-supplied predicates keep a closure behind
//! [`Template::Custom`], carrying an explicit render label.
//!
//! ## Crate Policy
//!
//! - Templates are immutable trees: built once, shared freely, reused
//!   across many validations. All variants are `Clone` (closures are
//!   reference-counted) and `Send + Sync`.
//! - No `panic!()` or `.unwrap()` outside tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The JSON value categories a [`Template::Kind`] leaf can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// A JSON string.
    String,
    /// Any JSON number, integral or not.
    Number,
    /// A JSON number representable as `i64` or `u64`.
    Integer,
    /// A JSON boolean.
    Boolean,
    /// JSON `null`.
    Null,
    /// A JSON object (plain map).
    Object,
    /// A JSON array.
    Array,
}

impl ValueKind {
    /// Whether `value` belongs to this category.
    pub fn admits(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::Null => value.is_null(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }

    /// The category of a concrete value.
    ///
    /// Integral numbers classify as [`ValueKind::Integer`]; note that
    /// `Integer` values also satisfy `Number.admits()`.
    pub fn of(value: &Value) -> ValueKind {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Lowercase category name, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Object => "object",
            Self::Array => "array",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A declarative description of expected structure and content.
///
/// Build templates with the constructors in [`crate::combinators`] (or
/// [`crate::normalize`] for literal JSON structures), then check candidates
/// with [`crate::validate`] or [`Template::matches`].
///
/// # Invariants
///
/// - A template is a finite owned tree; cycles are unrepresentable.
/// - Matching a template against a value is pure: no variant mutates
///   itself or the candidate, and [`Template::Custom`] closures are
///   required to be stateless (the engine may re-evaluate them).
#[derive(Clone)]
pub enum Template {
    /// Key may be absent; if present, the inner template must match.
    Optional(Box<Template>),
    /// Value must be present; `null` matches, anything else delegates.
    Nullable(Box<Template>),
    /// Any present value matches, regardless of content.
    Exists,
    /// Value must belong to a JSON type category.
    Kind(ValueKind),
    /// Value must equal a literal (by value equality).
    Equals(Value),
    /// Value must equal one of a fixed set of options.
    Choice(Vec<Value>),
    /// All inner templates must match (`and`); vacuously true when empty.
    All(Vec<Template>),
    /// At least one inner template must match (`or`); always false when empty.
    Any(Vec<Template>),
    /// Array whose every element matches `inner`, with length bounds.
    /// `max: None` means unbounded.
    Array {
        /// Template every element must satisfy.
        inner: Box<Template>,
        /// Minimum length, inclusive.
        min: usize,
        /// Maximum length, inclusive; `None` for unbounded.
        max: Option<usize>,
    },
    /// Object whose every value matches `inner` (keys unconstrained),
    /// with entry-count bounds.
    MapOf {
        /// Template every entry value must satisfy.
        inner: Box<Template>,
        /// Minimum entry count, inclusive.
        min: usize,
        /// Maximum entry count, inclusive; `None` for unbounded.
        max: Option<usize>,
    },
    /// Array matched positionally: same length, element `i` against
    /// template `i`.
    Sequence(Vec<Template>),
    /// Object matched field-by-field. In exact mode (`loose: false`) the
    /// candidate's key set must not contain keys outside `fields`; in
    /// loose mode extra keys are tolerated. Missing non-optional keys
    /// fail in both modes.
    Object {
        /// Expected fields, keyed by name.
        fields: BTreeMap<String, Template>,
        /// Whether extra candidate keys are tolerated.
        loose: bool,
    },
    /// String of the shape `YYYY-MM-DDTHH:MM:SS.mmmZ`, optionally followed
    /// by a `±HH:MM` offset, with calendar-valid field values.
    IsoDate,
    /// User-supplied predicate with a label used in rendered signatures.
    Custom {
        /// Name shown by the reporter for this leaf.
        label: String,
        /// The predicate. Must be pure: a function of its argument only.
        test: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
    },
}

impl Template {
    /// Whether this candidate matches the template.
    ///
    /// Boolean convenience over [`crate::validate`]; use `validate` when
    /// the mismatch description is needed.
    pub fn matches(&self, candidate: &Value) -> bool {
        crate::engine::check(self, candidate, "").is_ok()
    }

    /// Render this template's signature, e.g. `and(isString,choice("a","b"))`.
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// Whether the wrapped key is allowed to be absent from a candidate
    /// object. Only an outermost [`Template::Optional`] counts.
    pub fn is_optional(&self) -> bool {
        matches!(self, Template::Optional(_))
    }
}
