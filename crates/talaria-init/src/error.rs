//! Start-up error types.

use thiserror::Error;

/// Result type alias using [`InitError`].
pub type InitResult<T> = Result<T, InitError>;

/// Errors raised by the start-up registry.
#[derive(Error, Debug)]
pub enum InitError {
    /// An initializer failed.
    #[error("initializer failed: {message}")]
    Failed {
        /// Human-readable failure message.
        message: String,
        /// The underlying error.
        #[source]
        source: Option<anyhow::Error>,
    },

    /// An initializer was registered after the start-up sequence ran.
    #[error("initializers already ran; registration must happen at start-up")]
    AlreadyRan,
}

impl InitError {
    /// Creates a failure with a message.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a failure wrapping a source error.
    pub fn failed_with_source(
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Failed {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_message() {
        let err = InitError::failed("database unreachable");
        assert!(err.to_string().contains("database unreachable"));
    }

    #[test]
    fn test_failed_with_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = InitError::failed_with_source("database unreachable", io);
        assert!(std::error::Error::source(&err).is_some());
    }
}
