//! Error types for catalog operations.

use std::io;
use std::path::PathBuf;

use fieldbridge_core::FieldError;
use thiserror::Error;

/// Primary error type for catalog loading and lookup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Field contained an invalid value.
    #[error("invalid value for '{field}' in '{section}': {message}")]
    InvalidField {
        /// Section that failed validation.
        section: String,
        /// Field that failed validation.
        field: String,
        /// Human-readable error description.
        message: String,
    },
    /// The same name was declared twice where names must be unique.
    #[error("duplicate entry '{field}' in '{section}'")]
    DuplicateField {
        /// Section containing the duplicate.
        section: String,
        /// Name that was repeated.
        field: String,
    },
    /// No classification is registered for the resource type.
    #[error("unknown resource type '{resource}'")]
    UnknownResource {
        /// Resource type requested by the caller.
        resource: String,
    },
    /// A resource classification failed its own invariants.
    #[error("invalid classification for '{resource}'")]
    Classification {
        /// Resource type whose classification was rejected.
        resource: String,
        /// Underlying classification error.
        source: FieldError,
    },
    /// Catalog document could not be parsed.
    #[error("malformed catalog document")]
    Parse {
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// File system operation failed.
    #[error("filesystem operation failed")]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Path involved in the operation.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
}

/// Convenience alias for catalog results.
pub type ConfigResult<T> = Result<T, ConfigError>;
