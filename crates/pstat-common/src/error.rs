//! Error types for pstat.

use thiserror::Error;

/// Result type alias for pstat operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for pstat.
#[derive(Error, Debug)]
pub enum Error {
    // Engine errors (10-19)
    /// Input outside the mathematically valid domain.
    #[error("domain error: {0}")]
    Domain(String),

    /// Input violates a relational invariant between parameters.
    #[error("range error: {0}")]
    Range(String),

    /// A conditioning or normalizing probability is exactly zero.
    #[error("division by zero: {0}")]
    DivisionByZero(String),

    // Configuration errors (20-29)
    #[error("configuration error: {0}")]
    Config(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn domain(message: impl Into<String>) -> Self {
        Error::Domain(message.into())
    }

    pub fn range(message: impl Into<String>) -> Self {
        Error::Range(message.into())
    }

    pub fn division_by_zero(message: impl Into<String>) -> Self {
        Error::DivisionByZero(message.into())
    }

    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output.
    pub fn code(&self) -> u32 {
        match self {
            Error::Domain(_) => 10,
            Error::Range(_) => 11,
            Error::DivisionByZero(_) => 12,
            Error::Config(_) => 20,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Stable snake_case name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Domain(_) => "domain_error",
            Error::Range(_) => "range_error",
            Error::DivisionByZero(_) => "division_by_zero",
            Error::Config(_) => "config_error",
            Error::Io(_) => "io_error",
            Error::Json(_) => "json_error",
        }
    }

    /// True for errors caused by the numbers a user entered.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::Domain(_) | Error::Range(_) | Error::DivisionByZero(_)
        )
    }
}
