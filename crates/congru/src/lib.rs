//! # congru — Declarative Structural Validation for JSON Values
//!
//! Checks an arbitrary `serde_json::Value` against a *template* describing
//! expected shape, types, and value constraints, and reports the first
//! mismatch found in human-readable form.
//!
//! ```
//! use congru::{object, is_string, array_bounded, optional, validate};
//! use serde_json::json;
//!
//! let template = object([
//!     ("name", is_string()),
//!     ("tags", array_bounded(is_string(), 1, 8)),
//!     ("bio", optional(is_string())),
//! ]);
//!
//! let candidate = json!({"name": "ada", "tags": ["math"]});
//! assert!(validate(&template, &candidate).is_ok());
//!
//! let mismatch = validate(&template, &json!({"name": 5, "tags": ["x"]})).unwrap_err();
//! assert_eq!(mismatch.to_string(), "/name: value 5 does not satisfy isString");
//! ```
//!
//! ## Key Design Principles
//!
//! 1. **Templates are a tagged variant type.** Every combinator constructs
//!    a [`Template`] variant; the engine and the reporter pattern-match
//!    exhaustively over the same type. Malformed template leaves are
//!    unrepresentable.
//!
//! 2. **Mismatches are return values, not shared state.** [`validate`]
//!    returns `Result<(), Mismatch>`; there is no "last error" anywhere,
//!    so concurrent validations against a shared template cannot race.
//!
//! 3. **First mismatch wins.** The engine short-circuits: key-set
//!    incongruence is reported before any per-value check, and the
//!    innermost failing value is named by a JSON-pointer-style path.
//!
//! 4. **Asymmetric loose mode.** Loose object templates tolerate extra
//!    candidate keys but never missing ones.
//!
//! ## Crate Policy
//!
//! - Pure, synchronous, in-process: no network, file, or persisted state.
//! - No schema-language parsing and no type coercion; candidates either
//!   are congruent or they are not.
//! - No `unsafe`, no `panic!()` or `.unwrap()` outside tests.

pub mod combinators;
mod datetime;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod report;
pub mod template;

// Re-export the full building-and-checking vocabulary.
pub use combinators::{
    all_of, any_of, array, array_bounded, array_min, choice, equals, exists, is_boolean,
    is_integer, is_iso_date, is_null, is_number, is_string, map_bounded, map_min, map_of,
    nullable, object, object_loose, optional, predicate, sequence,
};
pub use engine::{validate, Mismatch};
pub use error::TemplateError;
pub use normalize::{literal, recursive_object, recursive_object_loose};
pub use report::describe_template;
pub use template::{Template, ValueKind};
