//! Error types for `docs2schema`.
//!
//! Library-level failures are defined next to the code that raises them
//! ([`crate::schema::error`], [`ConfigError`]); this module aggregates them
//! and maps each kind to a process exit code.

use std::path::PathBuf;
use thiserror::Error;

use crate::schema::SchemaError;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `docs2schema` CLI operations.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid YAML, unknown field, bad value)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (unreadable input, unwritable output)
    pub const IO_ERROR: i32 = 3;

    /// A type notation in the input could not be translated
    pub const TRANSLATION_ERROR: i32 = 4;

    /// A reference names a definition that does not exist
    pub const UNRESOLVED_REFERENCE: i32 = 5;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `docs2schema` operations.
#[derive(Debug, Error)]
pub enum Docs2SchemaError {
    /// Schema generation failed
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Docs2SchemaError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Schema(SchemaError::Translation(_)) => ExitCode::TRANSLATION_ERROR,
            Self::Schema(SchemaError::UnresolvedReferences(_)) => ExitCode::UNRESOLVED_REFERENCE,
            Self::Config(_) => ExitCode::CONFIG_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
            Self::Json(_) => ExitCode::ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the configuration file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Referenced configuration file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Configuration file could not be read
    #[error("cannot read {path}: {source}")]
    Unreadable {
        /// Path to the configuration file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration file exceeds the size limit
    #[error("{path} is {size} bytes (limit: {limit})")]
    TooLarge {
        /// Path to the configuration file
        path: PathBuf,
        /// Actual size in bytes
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },
}
