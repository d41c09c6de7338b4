//! Error types for raist-core.

use thiserror::Error;

/// Top-level error type for raist-core.
///
/// Below-threshold alignment is deliberately absent: a rejected cycle is a
/// regular [`CycleOutcome`](crate::governance::CycleOutcome), not a failure.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidVectorDimension { expected: usize, actual: usize },

    #[error("Validation error: {field} - {message}")]
    ValidationError { field: String, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Response generation failed: {0}")]
    GenerationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::SerializationError(err.to_string())
    }
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::ConfigError(err.to_string())
    }
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::ConfigError(format!("Failed to parse config: {}", err))
    }
}

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
