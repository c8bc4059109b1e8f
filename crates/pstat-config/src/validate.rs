//! Configuration validation errors.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for configuration operations.
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings JSON: {0}")]
    Parse(String),

    #[error("invalid settings: {}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error("settings file not found: {0}")]
    NotFound(PathBuf),
}

impl From<ValidationError> for pstat_common::Error {
    fn from(err: ValidationError) -> Self {
        pstat_common::Error::Config(err.to_string())
    }
}
