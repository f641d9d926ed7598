//! Error type of the report driver

use thiserror::Error;

/// Errors from any stage of the report
#[derive(Error, Debug)]
pub enum Error {
    /// Loading, cleaning, recoding, testing or rendering failed
    #[error(transparent)]
    Survey(#[from] gateway_core::Error),

    /// DataFrame aggregation failed
    #[error("Aggregation error: {0}")]
    Frame(#[from] gateway_polars::Error),

    /// Configuration file could not be parsed
    #[error("Configuration error: {0}")]
    ConfigFormat(#[from] serde_json::Error),

    /// Configuration values out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Survey(gateway_core::Error::Io(err))
    }
}
