//! Error types and exit codes for vaultnorm
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure, including a run where at least one document failed to persist
//! - 2: Usage error (bad flags/args, bad configuration values)
//! - 3: Data error (corpus root missing or not enumerable, `check` found problems)

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - unreadable corpus root, problems found by `check` (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during vaultnorm operations
#[derive(Error, Debug)]
pub enum NormError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human, json, or records)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("corpus root not found: {root:?}")]
    CorpusNotFound { root: PathBuf },

    #[error("cannot enumerate corpus root {root:?}: {reason}")]
    CorpusUnreadable { root: PathBuf, reason: String },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    #[error("{0}")]
    ChecksFailed(String),

    // Generic failures (exit code 1)
    #[error("document {path} is not valid UTF-8 text")]
    NotText { path: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("run finished with {failed} failed document(s)")]
    PartialFailure { failed: usize },

    #[error("{0}")]
    Other(String),
}

impl NormError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        NormError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        NormError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        NormError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            NormError::UnknownFormat(_)
            | NormError::UsageError(_)
            | NormError::InvalidValue { .. } => ExitCode::Usage,

            NormError::CorpusNotFound { .. }
            | NormError::CorpusUnreadable { .. }
            | NormError::NotFound { .. }
            | NormError::ChecksFailed(_) => ExitCode::Data,

            NormError::NotText { .. }
            | NormError::Io(_)
            | NormError::Yaml(_)
            | NormError::Json(_)
            | NormError::Toml(_)
            | NormError::FailedOperationWithTarget { .. }
            | NormError::PartialFailure { .. }
            | NormError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            NormError::UnknownFormat(_) => "unknown_format",
            NormError::UsageError(_) => "usage_error",
            NormError::InvalidValue { .. } => "invalid_value",
            NormError::CorpusNotFound { .. } => "corpus_not_found",
            NormError::CorpusUnreadable { .. } => "corpus_unreadable",
            NormError::NotFound { .. } => "not_found",
            NormError::ChecksFailed(_) => "checks_failed",
            NormError::NotText { .. } => "not_text",
            NormError::Io(_) => "io_error",
            NormError::Yaml(_) => "yaml_error",
            NormError::Json(_) => "json_error",
            NormError::Toml(_) => "toml_error",
            NormError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            NormError::PartialFailure { .. } => "partial_failure",
            NormError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for vaultnorm operations
pub type Result<T> = std::result::Result<T, NormError>;
