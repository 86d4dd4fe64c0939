//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while applying configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The supplied configuration document did not match the expected shape.
    #[error("failed to parse configuration document: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration value.
    #[error("invalid configuration value for {field}: {reason}")]
    InvalidValue {
        /// The field with the invalid value.
        field: String,
        /// Explanation of why the value is invalid.
        reason: String,
    },
}

impl ConfigError {
    /// Create a new invalid value error.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
