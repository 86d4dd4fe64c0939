//! Store error types.

use talaria_core::HandlerError;
use thiserror::Error;

/// Result type alias using [`StoreError`].
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the persistence layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record exists under the given key.
    #[error("{table} record with key '{key}' not found")]
    NotFound {
        /// The table that was queried.
        table: String,
        /// The missing key.
        key: String,
    },

    /// A record already exists under the given key.
    #[error("{table} record with key '{key}' already exists")]
    Conflict {
        /// The table that was written.
        table: String,
        /// The conflicting key.
        key: String,
    },

    /// The record is missing its key where one is required.
    #[error("record has no key")]
    MissingKey,

    /// The record does not serialize to a JSON object.
    #[error("record must serialize to an object")]
    NotADocument,

    /// Record serialization or deserialization failed.
    #[error("record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The storage backend failed.
    #[error("store backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl StoreError {
    /// Creates a not-found error.
    pub fn not_found(table: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound {
            table: table.into(),
            key: key.into(),
        }
    }

    /// Creates a conflict error.
    pub fn conflict(table: impl Into<String>, key: impl Into<String>) -> Self {
        Self::Conflict {
            table: table.into(),
            key: key.into(),
        }
    }
}

impl From<StoreError> for HandlerError {
    /// Store failures reaching the pipeline classify as internal errors;
    /// business code that wants a different status maps them explicitly.
    fn from(err: StoreError) -> Self {
        HandlerError::internal_with_source("store operation failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = StoreError::not_found("users", "user-1");
        assert!(err.to_string().contains("users"));
        assert!(err.to_string().contains("user-1"));
    }

    #[test]
    fn test_conversion_into_handler_error_classifies_500() {
        let err: HandlerError = StoreError::not_found("users", "user-1").into();
        assert_eq!(err.classify().status, 500);
    }
}
