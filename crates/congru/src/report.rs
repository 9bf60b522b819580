//! # Mismatch Reporter
//!
//! Human-readable rendering for templates and mismatches, implemented as
//! `Display` so reports compose with logging and error chains.
//!
//! Template signatures render in constructor notation,
//! `and(isString,choice("a","b"))`, with object templates as
//! `{key: desc, ...}` and positional sequences as `[desc,desc]`. The
//! rendering is deterministic: object fields are stored ordered, and
//! every variant renders from its own data alone.

use std::fmt;

use crate::engine::Mismatch;
use crate::template::{Template, ValueKind};

/// Render a template's signature. Equivalent to `template.to_string()`.
pub fn describe_template(template: &Template) -> String {
    template.to_string()
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Optional(inner) => write!(f, "optional({inner})"),
            Self::Nullable(inner) => write!(f, "nullable({inner})"),
            Self::Exists => f.write_str("exists()"),
            Self::Kind(kind) => f.write_str(kind_signature(*kind)),
            Self::Equals(literal) => write!(f, "{literal}"),
            Self::Choice(options) => {
                f.write_str("choice(")?;
                for (i, option) in options.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{option}")?;
                }
                f.write_str(")")
            }
            Self::All(parts) => write_variadic(f, "and", parts),
            Self::Any(parts) => write_variadic(f, "or", parts),
            Self::Array { inner, min, max } => write_quantifier(f, "array", inner, *min, *max),
            Self::MapOf { inner, min, max } => write_quantifier(f, "map", inner, *min, *max),
            Self::Sequence(parts) => {
                f.write_str("[")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{part}")?;
                }
                f.write_str("]")
            }
            Self::Object { fields, loose } => {
                f.write_str("{")?;
                for (i, (key, field)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {field}")?;
                }
                if *loose {
                    if !fields.is_empty() {
                        f.write_str(", ")?;
                    }
                    f.write_str("...")?;
                }
                f.write_str("}")
            }
            Self::IsoDate => f.write_str("isISODate"),
            Self::Custom { label, .. } => f.write_str(label),
        }
    }
}

// Custom carries a closure, so Debug is delegated to the signature.
impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Template({self})")
    }
}

fn kind_signature(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::String => "isString",
        ValueKind::Number => "isNumber",
        ValueKind::Integer => "isInteger",
        ValueKind::Boolean => "isBoolean",
        ValueKind::Null => "isNull",
        ValueKind::Object => "isObject",
        ValueKind::Array => "isArray",
    }
}

fn write_variadic(f: &mut fmt::Formatter<'_>, name: &str, parts: &[Template]) -> fmt::Result {
    write!(f, "{name}(")?;
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{part}")?;
    }
    f.write_str(")")
}

fn write_quantifier(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    inner: &Template,
    min: usize,
    max: Option<usize>,
) -> fmt::Result {
    match (min, max) {
        (0, None) => write!(f, "{name}({inner})"),
        (min, None) => write!(f, "{name}({inner},{min})"),
        (min, Some(max)) => write!(f, "{name}({inner},{min},{max})"),
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeySet {
                path,
                expected,
                actual,
                missing,
                unexpected,
            } => {
                write!(
                    f,
                    "{}: key set mismatch: expected ",
                    location(path)
                )?;
                write_keys(f, expected)?;
                f.write_str(", actual ")?;
                write_keys(f, actual)?;
                f.write_str(", missing ")?;
                write_keys(f, missing)?;
                f.write_str(", unexpected ")?;
                write_keys(f, unexpected)
            }
            Self::Value {
                path,
                expected,
                actual,
            } => write!(
                f,
                "{}: value {actual} does not satisfy {expected}",
                location(path)
            ),
            Self::NotAnObject { path, actual } => write!(
                f,
                "{}: expected an object, got {}",
                location(path),
                ValueKind::of(actual)
            ),
        }
    }
}

fn location(path: &str) -> &str {
    if path.is_empty() {
        "(root)"
    } else {
        path
    }
}

fn write_keys(f: &mut fmt::Formatter<'_>, keys: &[String]) -> fmt::Result {
    f.write_str("[")?;
    for (i, key) in keys.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        f.write_str(key)?;
    }
    f.write_str("]")
}
