//! Unified error types for roimap engine operations.
//!
//! Validation failures abort a calculation before any numbers are produced;
//! metrics without a well-defined numeric answer are *not* errors — they are
//! carried inside results as [`crate::core::MetricValue::NonConvergent`] so
//! partial results stay usable downstream.

use std::path::Path;
use thiserror::Error;

/// Unified error type for engine operations.
///
/// # Categories
///
/// - `Validation`: malformed or out-of-range input, rejected before computation
/// - `Configuration`: missing or invalid benchmark/threshold configuration
/// - `Io`: file system operations (CLI input/output files)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Input validation failures (negative rates, zero counts, ...).
    /// Carries the field name and offending value so callers can present
    /// a user-facing message.
    #[error("validation error: {field} = {value}: {message}")]
    Validation {
        field: String,
        value: f64,
        message: String,
    },

    /// Benchmark or threshold configuration issues
    #[error("configuration error: {0}")]
    Configuration(String),

    /// File system I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl EngineError {
    /// Create a validation error for a named input field.
    pub fn validation(field: impl Into<String>, value: f64, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            value,
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a configuration error with file context.
    pub fn config_with_path(message: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self::Configuration(format!(
            "{} (file: {})",
            message.into(),
            path.as_ref().display()
        ))
    }

    /// Check if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Convenience alias for engine results.
pub type EngineResult<T> = Result<T, EngineError>;
