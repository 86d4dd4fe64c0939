//! Handler trait for business callbacks.
//!
//! The [`Handler`] trait defines the interface between the adapter pipeline
//! and business logic.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

use crate::{ApiRequest, HandlerError, InvocationContext, Response};

/// The business callback invoked by the adapter pipeline.
///
/// For gateway-shaped events the pipeline calls [`call`](Self::call) with the
/// normalized request, a [`Response`] accumulator the handler may annotate,
/// and the invocation context. The returned content (if any) is serialized
/// into the response body; returning `Ok(None)` produces an empty body.
///
/// Non-gateway events reach [`call_raw`](Self::call_raw) instead, and only
/// when the adapter was built with a passthrough policy for unhandled
/// events. The default implementation returns an empty payload.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use serde_json::{json, Value};
/// use talaria_core::{ApiRequest, Handler, HandlerError, InvocationContext, Response};
///
/// struct EchoHandler;
///
/// impl Handler for EchoHandler {
///     async fn call(
///         &self,
///         request: Arc<ApiRequest>,
///         _response: Response,
///         _ctx: Arc<InvocationContext>,
///     ) -> Result<Option<Value>, HandlerError> {
///         Ok(request.body.clone())
///     }
/// }
/// ```
pub trait Handler: Send + Sync + 'static {
    /// Handles a normalized gateway request.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] on failure; the pipeline classifies it into
    /// a complete response.
    fn call(
        &self,
        request: Arc<ApiRequest>,
        response: Response,
        ctx: Arc<InvocationContext>,
    ) -> impl Future<Output = Result<Option<Value>, HandlerError>> + Send;

    /// Handles a raw, non-gateway event.
    ///
    /// Invoked only on the passthrough path; the returned value goes back to
    /// the hosting runtime verbatim, bypassing formatting entirely.
    fn call_raw(
        &self,
        event: Arc<Value>,
        ctx: Arc<InvocationContext>,
    ) -> impl Future<Output = Result<Value, HandlerError>> + Send {
        let _ = (event, ctx);
        async { Ok(Value::Null) }
    }
}

/// A function-based handler wrapper.
///
/// Lets an async closure serve as a [`Handler`] without a dedicated type.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use serde_json::Value;
/// use talaria_core::{ApiRequest, FnHandler, HandlerError, InvocationContext, Response};
///
/// let handler = FnHandler::new(
///     |_request: Arc<ApiRequest>, _response: Response, _ctx: Arc<InvocationContext>| async move {
///         Ok::<Option<Value>, HandlerError>(None)
///     },
/// );
/// ```
pub struct FnHandler<F> {
    func: F,
}

impl<F> FnHandler<F> {
    /// Creates a new function-based handler.
    #[must_use]
    pub const fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F, Fut> Handler for FnHandler<F>
where
    F: Fn(Arc<ApiRequest>, Response, Arc<InvocationContext>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Option<Value>, HandlerError>> + Send + 'static,
{
    fn call(
        &self,
        request: Arc<ApiRequest>,
        response: Response,
        ctx: Arc<InvocationContext>,
    ) -> impl Future<Output = Result<Option<Value>, HandlerError>> + Send {
        (self.func)(request, response, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_fn_handler_returns_content() {
        let handler = FnHandler::new(|_request, _response, _ctx| async move {
            Ok(Some(json!({"email": "foo@example.com"})))
        });

        let content = handler
            .call(
                Arc::new(ApiRequest::default()),
                Response::new(),
                Arc::new(InvocationContext::mock()),
            )
            .await
            .unwrap();

        assert_eq!(content, Some(json!({"email": "foo@example.com"})));
    }

    #[tokio::test]
    async fn test_fn_handler_can_annotate_response() {
        let handler = FnHandler::new(|_request, response: Response, _ctx| async move {
            response.insert_header("x-baz", "baz");
            Ok(None)
        });

        let response = Response::new();
        handler
            .call(
                Arc::new(ApiRequest::default()),
                response.clone(),
                Arc::new(InvocationContext::mock()),
            )
            .await
            .unwrap();

        assert_eq!(response.snapshot().header_names(), vec!["x-baz"]);
    }

    #[tokio::test]
    async fn test_default_call_raw_returns_null() {
        let handler = FnHandler::new(|_request, _response, _ctx| async move { Ok(None) });

        let value = handler
            .call_raw(Arc::new(json!({"detail": "unrouted"})), Arc::new(InvocationContext::mock()))
            .await
            .unwrap();

        assert_eq!(value, Value::Null);
    }
}
