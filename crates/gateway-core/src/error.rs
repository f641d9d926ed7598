//! Error types for the survey analysis
//!
//! Provides a unified error type for all gateway-stats crates.

use crate::Field;
use thiserror::Error;

/// Core error type for loading, cleaning and testing survey data
#[derive(Error, Debug)]
pub enum Error {
    /// A required column is absent from the input header
    #[error("Schema mismatch: required column `{column}` is absent")]
    SchemaMismatch { column: String },

    /// A pipeline stage removed every row
    #[error("Empty result set after {stage}")]
    EmptyResultSet { stage: String },

    /// A significance test received too few or constant values
    #[error("Degenerate sample: {reason}")]
    DegenerateSample { reason: String },

    /// A value outside the expected code set
    #[error("Invalid code {code} in column `{column}`")]
    InvalidCode { column: String, code: i64 },

    /// Input that cannot be parsed as the survey layout
    #[error("Malformed input at line {line}: {reason}")]
    Malformed { line: u64, reason: String },

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Chart rendering failed
    #[error("Render error: {0}")]
    Render(String),

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a stage that produced no rows
    pub fn empty_result(stage: &str) -> Self {
        Self::EmptyResultSet {
            stage: stage.to_string(),
        }
    }

    /// Create an error for an unusable test sample
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateSample {
            reason: reason.into(),
        }
    }

    /// Create an error for a code the codebook does not allow in `field`
    pub fn invalid_code(field: Field, code: i64) -> Self {
        Self::InvalidCode {
            column: field.column().to_string(),
            code,
        }
    }

    /// Whether the affected analysis can be skipped instead of aborting the run
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DegenerateSample { .. })
    }
}
