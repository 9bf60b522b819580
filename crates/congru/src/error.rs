//! # Error Types
//!
//! Construction-time errors, derived with `thiserror`.
//!
//! ## Design
//!
//! A structural mismatch during validation is *not* an error: it is the
//! expected negative outcome, returned as a [`crate::Mismatch`] value.
//! `TemplateError` covers the one misuse that must fail loudly before any
//! validation happens: handing the recursive normalizer something other
//! than an object at the root.

use thiserror::Error;

use crate::template::ValueKind;

/// Error raised while constructing a template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The recursive normalizer requires a JSON object at the root;
    /// arrays and scalars are only valid nested inside one.
    #[error("recursive template root must be a JSON object, got {0}")]
    RootNotObject(ValueKind),
}
