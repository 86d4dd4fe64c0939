//! Hook types and constructors.
//!
//! Hooks are type-erased async callbacks stored in the registry. Each phase
//! has its own argument list:
//!
//! - before: the normalized request and the invocation context
//! - after: the normalized request and the formatted response
//! - error: the original raw event, the failure, and the formatted response
//!
//! Arguments arrive as `Arc` clones; a hook's only expected side effect is
//! external (logging, metrics). The dispatcher awaits each hook before
//! running the next.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;
use talaria_core::{ApiRequest, GatewayResponse, HandlerError, InvocationContext};

/// A boxed future, as returned by type-erased hooks.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The outcome of a single hook invocation.
pub type HookResult = Result<(), HandlerError>;

/// A before-phase hook.
pub type BeforeHook =
    Arc<dyn Fn(Arc<ApiRequest>, Arc<InvocationContext>) -> BoxFuture<'static, HookResult> + Send + Sync>;

/// An after-phase hook.
pub type AfterHook =
    Arc<dyn Fn(Arc<ApiRequest>, Arc<GatewayResponse>) -> BoxFuture<'static, HookResult> + Send + Sync>;

/// An error-phase hook.
pub type ErrorHook = Arc<
    dyn Fn(Arc<Value>, Arc<HandlerError>, Arc<GatewayResponse>) -> BoxFuture<'static, HookResult>
        + Send
        + Sync,
>;

/// Wraps an async closure as a [`BeforeHook`].
///
/// # Example
///
/// ```
/// let hook = talaria_middleware::before_hook(|request, ctx| async move {
///     tracing::info!(request_id = %ctx.request_id(), method = %request.http_method, "inbound");
///     Ok(())
/// });
/// ```
pub fn before_hook<F, Fut>(f: F) -> BeforeHook
where
    F: Fn(Arc<ApiRequest>, Arc<InvocationContext>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HookResult> + Send + 'static,
{
    Arc::new(move |request, ctx| Box::pin(f(request, ctx)))
}

/// Wraps an async closure as an [`AfterHook`].
pub fn after_hook<F, Fut>(f: F) -> AfterHook
where
    F: Fn(Arc<ApiRequest>, Arc<GatewayResponse>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HookResult> + Send + 'static,
{
    Arc::new(move |request, response| Box::pin(f(request, response)))
}

/// Wraps an async closure as an [`ErrorHook`].
pub fn error_hook<F, Fut>(f: F) -> ErrorHook
where
    F: Fn(Arc<Value>, Arc<HandlerError>, Arc<GatewayResponse>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HookResult> + Send + 'static,
{
    Arc::new(move |event, error, response| Box::pin(f(event, error, response)))
}
