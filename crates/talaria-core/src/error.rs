//! Error types for Talaria.
//!
//! This module provides [`HandlerError`], the error taxonomy shared by the
//! normalizer, the hook phases, and business handlers, together with its
//! exhaustive classification into a status code and response body.
//!
//! The taxonomy is a closed sum type rather than a string discriminant on an
//! open error shape, so the classifier match is checked by the compiler.

use http::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

/// Result type alias using [`HandlerError`].
pub type HandlerResult<T> = Result<T, HandlerError>;

/// Errors raised by the normalizer, hooks, or business handlers.
///
/// Every variant classifies to a complete response; the adapter never
/// surfaces one of these to the hosting runtime directly.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use talaria_core::HandlerError;
///
/// fn guard(role: &str) -> Result<(), HandlerError> {
///     if role != "admin" {
///         return Err(HandlerError::forbidden());
///     }
///     Ok(())
/// }
///
/// assert_eq!(guard("guest").unwrap_err().classify().status, 403);
/// ```
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Business-level validation failed; carries structured details.
    #[error("validation failed")]
    Validation {
        /// Structured validation details, returned to the caller.
        details: Value,
    },

    /// The request was malformed (for example, an unparseable body).
    #[error("bad request")]
    BadRequest {
        /// Optional structured details, returned to the caller.
        details: Option<Value>,
    },

    /// The caller is not allowed to perform the operation.
    #[error("forbidden")]
    Forbidden {
        /// Optional structured details, returned to the caller.
        details: Option<Value>,
    },

    /// Anything else. Honors an explicit status code and body when present.
    #[error("{message}")]
    Other {
        /// Human-readable error message, for logs only.
        message: String,
        /// Explicit status code; defaults to 500 when unset.
        status_code: Option<StatusCode>,
        /// Explicit response body; defaults to `"Internal Server Error"`.
        body: Option<Value>,
        /// The underlying error, never exposed to callers.
        #[source]
        source: Option<anyhow::Error>,
    },
}

impl HandlerError {
    /// Creates a validation error with structured details.
    #[must_use]
    pub fn validation(details: Value) -> Self {
        Self::Validation { details }
    }

    /// Creates a bad request error with no details.
    #[must_use]
    pub fn bad_request() -> Self {
        Self::BadRequest { details: None }
    }

    /// Creates a bad request error carrying structured details.
    #[must_use]
    pub fn bad_request_with(details: Value) -> Self {
        Self::BadRequest {
            details: Some(details),
        }
    }

    /// Creates a forbidden error with no details.
    #[must_use]
    pub fn forbidden() -> Self {
        Self::Forbidden { details: None }
    }

    /// Creates a forbidden error carrying structured details.
    #[must_use]
    pub fn forbidden_with(details: Value) -> Self {
        Self::Forbidden {
            details: Some(details),
        }
    }

    /// Creates an internal error with a message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
            status_code: None,
            body: None,
            source: None,
        }
    }

    /// Creates an internal error wrapping a source error.
    pub fn internal_with_source(
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Other {
            message: message.into(),
            status_code: None,
            body: None,
            source: Some(source.into()),
        }
    }

    /// Creates an error with an explicit status code and response body.
    #[must_use]
    pub fn with_status(status_code: StatusCode, body: Value) -> Self {
        Self::Other {
            message: format!("request failed with status {status_code}"),
            status_code: Some(status_code),
            body: Some(body),
            source: None,
        }
    }

    /// Returns `true` for validation errors.
    ///
    /// Validation failures are expected in normal operation and are logged
    /// at a lower severity than the rest of the taxonomy.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Classifies this error into a status code and response body.
    ///
    /// The mapping is total: every variant yields a complete classification
    /// and the formatter turns it into a well-formed response.
    #[must_use]
    pub fn classify(&self) -> Classified {
        match self {
            Self::Validation { details } => Classified {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                body: json!({ "data": details }),
            },
            Self::BadRequest { details } => Classified {
                status: StatusCode::BAD_REQUEST,
                body: details
                    .as_ref()
                    .map_or_else(|| json!("Bad Request"), |d| json!({ "data": d })),
            },
            Self::Forbidden { details } => Classified {
                status: StatusCode::FORBIDDEN,
                body: details
                    .as_ref()
                    .map_or_else(|| json!("Forbidden"), |d| json!({ "data": d })),
            },
            Self::Other {
                status_code, body, ..
            } => Classified {
                status: status_code.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                body: body
                    .clone()
                    .unwrap_or_else(|| json!("Internal Server Error")),
            },
        }
    }
}

/// A classified error: the status code and body shape of the response it
/// produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The response body, prior to serialization.
    pub body: Value,
}
