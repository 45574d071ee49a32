//! Error types for field marshaling.

use thiserror::Error;

use crate::field::FieldKind;

/// Primary error type for the field marshaling engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// A classified name has no matching attribute on the container.
    #[error("attribute '{attribute}' not found on container")]
    AttributeNotFound {
        /// Typed attribute name that was requested.
        attribute: String,
    },
    /// The container attribute holds a different kind than the classification declares.
    #[error("attribute '{attribute}' is {actual}, classified as {expected}")]
    AttributeKindMismatch {
        /// Typed attribute name.
        attribute: String,
        /// Kind declared by the classification.
        expected: FieldKind,
        /// Kind exposed by the container.
        actual: FieldKind,
    },
    /// Wire value could not be coerced into the bucket's kind (strict coercion only).
    #[error("field '{field}' expected {expected}, found {found}")]
    FieldTypeMismatch {
        /// Wire field name.
        field: String,
        /// Kind of the bucket the field was routed to.
        expected: FieldKind,
        /// JSON type actually received.
        found: &'static str,
    },
    /// A present float attribute holds NaN or an infinity, which JSON cannot carry.
    #[error("attribute '{attribute}' holds a non-finite float")]
    NonFiniteFloat {
        /// Typed attribute name.
        attribute: String,
    },
    /// A name was declared in more than one kind of bucket.
    #[error("'{name}' is classified as both {first} and {second}")]
    DuplicateClassification {
        /// Offending attribute name.
        name: String,
        /// Kind of the first bucket containing the name.
        first: FieldKind,
        /// Kind of the conflicting bucket.
        second: FieldKind,
    },
    /// Classification entry was rejected during validation.
    #[error("invalid classification entry '{name}': {reason}")]
    InvalidClassification {
        /// Offending attribute name.
        name: String,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
}

/// Convenience alias for field marshaling results.
pub type FieldResult<T> = Result<T, FieldError>;
