//! Invocation context types.
//!
//! The [`InvocationContext`] carries the runtime-supplied metadata for one
//! invocation through the hook phases and into the handler.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique identifier for each invocation, using UUID v7.
///
/// UUID v7 is time-ordered, which makes it suitable for log correlation
/// across concurrently processed events.
///
/// # Example
///
/// ```
/// use talaria_core::RequestId;
///
/// let id = RequestId::new();
/// println!("Invocation: {}", id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Creates a new unique request ID using UUID v7.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `RequestId` from an existing UUID.
    ///
    /// Useful when the hosting runtime already assigned an id to the event.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for RequestId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<RequestId> for Uuid {
    fn from(id: RequestId) -> Self {
        id.0
    }
}

/// Per-invocation context supplied by the hosting runtime.
///
/// One context is created per inbound event and shared read-only with the
/// before hooks and the handler. The adapter never mutates it after the
/// invocation starts.
///
/// # Example
///
/// ```
/// use talaria_core::InvocationContext;
///
/// let ctx = InvocationContext::new().with_function_name("users-api");
/// println!("Handling invocation {}", ctx.request_id());
/// ```
#[derive(Debug, Clone)]
pub struct InvocationContext {
    /// Unique identifier for this invocation.
    request_id: RequestId,

    /// The name of the hosting function, if the runtime provides one.
    function_name: Option<String>,

    /// The full resource name of the hosting function.
    invoked_function_arn: Option<String>,

    /// When the invocation started processing.
    started_at: Instant,
}

impl InvocationContext {
    /// Creates a new context with a fresh request ID.
    #[must_use]
    pub fn new() -> Self {
        Self {
            request_id: RequestId::new(),
            function_name: None,
            invoked_function_arn: None,
            started_at: Instant::now(),
        }
    }

    /// Creates a new context with the specified request ID.
    #[must_use]
    pub fn with_request_id(request_id: RequestId) -> Self {
        Self {
            request_id,
            function_name: None,
            invoked_function_arn: None,
            started_at: Instant::now(),
        }
    }

    /// Creates a mock context for testing purposes.
    #[must_use]
    pub fn mock() -> Self {
        Self::new()
    }

    /// Returns the request ID.
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Returns the function name if set.
    #[must_use]
    pub fn function_name(&self) -> Option<&str> {
        self.function_name.as_deref()
    }

    /// Returns a new context with the specified function name.
    #[must_use]
    pub fn with_function_name(mut self, name: impl Into<String>) -> Self {
        self.function_name = Some(name.into());
        self
    }

    /// Returns the invoked function ARN if set.
    #[must_use]
    pub fn invoked_function_arn(&self) -> Option<&str> {
        self.invoked_function_arn.as_deref()
    }

    /// Returns a new context with the specified function ARN.
    #[must_use]
    pub fn with_invoked_function_arn(mut self, arn: impl Into<String>) -> Self {
        self.invoked_function_arn = Some(arn.into());
        self
    }

    /// Returns the elapsed time since the invocation started.
    #[must_use]
    pub fn elapsed(&self) -> std::time::Duration {
        self.started_at.elapsed()
    }
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self::new()
    }
}
