//! Response accumulator and final response types.
//!
//! Handlers annotate a [`Response`] accumulator (status override, headers)
//! while the pipeline owns turning it, together with the handler's returned
//! content, into the final [`GatewayResponse`] wire shape.

use std::sync::Arc;

use http::StatusCode;
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// A single header value: boolean, number, or string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderScalar {
    /// A boolean header value.
    Bool(bool),
    /// A numeric header value.
    Number(i64),
    /// A string header value.
    Str(String),
}

impl From<bool> for HeaderScalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for HeaderScalar {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for HeaderScalar {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for HeaderScalar {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// An accumulator header value: a single scalar or a sequence of scalars.
///
/// The final response partitions these: single values end up in `headers`,
/// sequences in `multiValueHeaders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
    /// One scalar value.
    Single(HeaderScalar),
    /// A sequence of scalar values.
    Multi(Vec<HeaderScalar>),
}

impl From<HeaderScalar> for HeaderValue {
    fn from(value: HeaderScalar) -> Self {
        Self::Single(value)
    }
}

impl From<bool> for HeaderValue {
    fn from(value: bool) -> Self {
        Self::Single(HeaderScalar::Bool(value))
    }
}

impl From<i64> for HeaderValue {
    fn from(value: i64) -> Self {
        Self::Single(HeaderScalar::Number(value))
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        Self::Single(HeaderScalar::from(value))
    }
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        Self::Single(HeaderScalar::Str(value))
    }
}

impl From<Vec<HeaderScalar>> for HeaderValue {
    fn from(values: Vec<HeaderScalar>) -> Self {
        Self::Multi(values)
    }
}

/// The mutable state behind a [`Response`] accumulator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseParts {
    /// Explicit status override. Unset by default; when set it always wins
    /// over the pipeline's status inference.
    pub status: Option<StatusCode>,

    /// Accumulated response headers, in insertion order.
    pub headers: IndexMap<String, HeaderValue>,
}

impl ResponseParts {
    /// Returns the accumulated header names in insertion order.
    #[must_use]
    pub fn header_names(&self) -> Vec<String> {
        self.headers.keys().cloned().collect()
    }
}

/// The per-invocation response accumulator handed to handlers.
///
/// A handler may set a status override and add headers; everything else
/// about the final response is synthesized by the pipeline. The handle is a
/// cheap clone over shared state, but the state itself belongs to exactly
/// one invocation's flow: the pipeline creates it, gives the handler a
/// clone, and reads it back once the handler settles.
///
/// # Example
///
/// ```
/// use http::StatusCode;
/// use talaria_core::Response;
///
/// let response = Response::new();
/// response.set_status(StatusCode::ACCEPTED);
/// response.insert_header("x-request-source", "mobile");
/// assert_eq!(response.snapshot().status, Some(StatusCode::ACCEPTED));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Response {
    inner: Arc<Mutex<ResponseParts>>,
}

impl Response {
    /// Creates an empty accumulator: no status override, no headers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status override.
    pub fn set_status(&self, status: StatusCode) {
        self.inner.lock().status = Some(status);
    }

    /// Returns the current status override, if any.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.inner.lock().status
    }

    /// Inserts a header, replacing any previous value under the same name.
    pub fn insert_header(&self, name: impl Into<String>, value: impl Into<HeaderValue>) {
        self.inner.lock().headers.insert(name.into(), value.into());
    }

    /// Returns a point-in-time copy of the accumulated state.
    #[must_use]
    pub fn snapshot(&self) -> ResponseParts {
        self.inner.lock().clone()
    }
}

/// The final wire response returned to the hosting runtime.
///
/// The body is always a string (possibly empty), never unserialized content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    /// The HTTP status code.
    pub status_code: u16,

    /// Single-value response headers.
    pub headers: IndexMap<String, HeaderScalar>,

    /// Multi-value response headers.
    pub multi_value_headers: IndexMap<String, Vec<HeaderScalar>>,

    /// The serialized response body.
    pub body: String,
}

impl GatewayResponse {
    /// A bare 500 response, used as the last-resort fallback when response
    /// synthesis itself fails.
    #[must_use]
    pub fn internal_error() -> Self {
        Self {
            status_code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            headers: IndexMap::new(),
            multi_value_headers: IndexMap::new(),
            body: "\"Internal Server Error\"".to_string(),
        }
    }
}
