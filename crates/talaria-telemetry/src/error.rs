//! Telemetry error types.

use thiserror::Error;

/// Result type alias using [`TelemetryError`].
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Errors that can occur during telemetry initialization.
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Logging subsystem initialization failed.
    #[error("failed to initialize logging: {0}")]
    LoggingInit(String),
}
