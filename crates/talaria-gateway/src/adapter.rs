//! The pipeline orchestrator.
//!
//! An [`Adapter`] composes the start-up registry, the middleware registry,
//! the configuration store, and a business handler into one entry point the
//! hosting runtime invokes per event.

use std::sync::Arc;

use serde_json::Value;
use talaria_config::ConfigStore;
use talaria_core::{
    ApiRequest, GatewayResponse, Handler, HandlerError, InvocationContext, Response,
};
use talaria_init::StartupRegistry;
use talaria_middleware::MiddlewareRegistry;

use crate::error::AdapterError;
use crate::format::format;
use crate::normalize::{lossy_request, normalize};

/// Policy for events no trigger type matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnhandledPolicy {
    /// Surface [`AdapterError::UnhandledEvent`] to the hosting runtime.
    #[default]
    Fail,
    /// Invoke the handler's raw callback directly, bypassing the gateway
    /// pipeline entirely.
    Passthrough,
}

/// The outcome of one invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterOutcome {
    /// A gateway-shaped event produced a formatted response.
    Response(GatewayResponse),
    /// A non-gateway event was passed through to the raw callback.
    Passthrough(Value),
}

impl AdapterOutcome {
    /// Returns the formatted response, if this outcome carries one.
    #[must_use]
    pub fn into_response(self) -> Option<GatewayResponse> {
        match self {
            Self::Response(response) => Some(response),
            Self::Passthrough(_) => None,
        }
    }

    /// Returns the passthrough value, if this outcome carries one.
    #[must_use]
    pub fn into_passthrough(self) -> Option<Value> {
        match self {
            Self::Passthrough(value) => Some(value),
            Self::Response(_) => None,
        }
    }
}

/// The invocation adapter.
///
/// One adapter serves many invocations, possibly concurrently; each
/// invocation runs as a single cooperative flow where every stage is
/// awaited in strict sequence. The middleware registry and the
/// configuration store are the only state shared between invocations.
///
/// # Example
///
/// ```no_run
/// use serde_json::{json, Value};
/// use std::sync::Arc;
/// use talaria_core::{ApiRequest, FnHandler, HandlerError, InvocationContext, Response};
/// use talaria_gateway::Adapter;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let adapter = Adapter::builder(FnHandler::new(
///     |request: Arc<ApiRequest>, _response: Response, _ctx: Arc<InvocationContext>| async move {
///         Ok::<_, HandlerError>(request.body.clone())
///     },
/// ))
/// .build();
///
/// let outcome = adapter
///     .invoke(json!({"httpMethod": "GET", "pathParameters": null}), InvocationContext::new())
///     .await
///     .unwrap();
/// # let _ = outcome;
/// # }
/// ```
pub struct Adapter<H> {
    handler: H,
    registry: Arc<MiddlewareRegistry>,
    config: Arc<ConfigStore>,
    startup: Arc<StartupRegistry>,
    unhandled: UnhandledPolicy,
}

impl<H: Handler> Adapter<H> {
    /// Creates a builder around `handler`.
    #[must_use]
    pub fn builder(handler: H) -> AdapterBuilder<H> {
        AdapterBuilder::new(handler)
    }

    /// The middleware registry this adapter dispatches.
    #[must_use]
    pub fn registry(&self) -> &Arc<MiddlewareRegistry> {
        &self.registry
    }

    /// The configuration store this adapter reads.
    #[must_use]
    pub fn config(&self) -> &Arc<ConfigStore> {
        &self.config
    }

    /// The start-up registry this adapter awaits.
    #[must_use]
    pub fn startup(&self) -> &Arc<StartupRegistry> {
        &self.startup
    }

    /// Processes one inbound event.
    ///
    /// Start-up completion is awaited before any other work. An event is
    /// treated as gateway-shaped if and only if it carries the
    /// `pathParameters` key, even when its value is `null`; everything else
    /// follows the unhandled policy.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] for start-up failures, strict-mode unhandled
    /// events, and raw passthrough failures. Gateway-shaped events always
    /// yield `Ok` with a complete response.
    pub async fn invoke(
        &self,
        event: Value,
        ctx: InvocationContext,
    ) -> Result<AdapterOutcome, AdapterError> {
        self.startup.run_once().await.map_err(AdapterError::Startup)?;

        let ctx = Arc::new(ctx);
        let is_gateway = event
            .as_object()
            .is_some_and(|fields| fields.contains_key("pathParameters"));

        if is_gateway {
            let response = self.invoke_gateway(Arc::new(event), ctx).await;
            return Ok(AdapterOutcome::Response(response));
        }

        match self.unhandled {
            UnhandledPolicy::Fail => {
                tracing::warn!("unhandled event");
                Err(AdapterError::UnhandledEvent)
            }
            UnhandledPolicy::Passthrough => {
                tracing::debug!(trigger_type = "passthrough", "invoking raw handler");
                let value = self
                    .handler
                    .call_raw(Arc::new(event), ctx)
                    .await
                    .map_err(AdapterError::Passthrough)?;
                Ok(AdapterOutcome::Passthrough(value))
            }
        }
    }

    async fn invoke_gateway(
        &self,
        raw: Arc<Value>,
        ctx: Arc<InvocationContext>,
    ) -> GatewayResponse {
        let response = Response::new();

        let request = match normalize(&raw) {
            Ok(request) => Arc::new(request),
            Err(err) => return self.fail(&raw, None, &response, err).await,
        };

        tracing::debug!(
            trigger_type = "gateway",
            request_id = %ctx.request_id(),
            http.method = %request.http_method,
            "invoking gateway handler"
        );

        match self.try_pipeline(&request, &response, &ctx).await {
            Ok(formatted) => formatted,
            Err(err) => self.fail(&raw, Some(&request), &response, err).await,
        }
    }

    /// The success path. Any failure drops the invocation into
    /// [`fail`](Self::fail) with whatever the accumulator holds so far.
    async fn try_pipeline(
        &self,
        request: &Arc<ApiRequest>,
        response: &Response,
        ctx: &Arc<InvocationContext>,
    ) -> Result<GatewayResponse, HandlerError> {
        self.registry.run_before(request, ctx).await?;

        let content = self
            .handler
            .call(Arc::clone(request), response.clone(), Arc::clone(ctx))
            .await?;

        // Configuration is re-read here on every invocation; a merge that
        // happened after this adapter was built is already visible.
        let config = self.config.get();
        let parts = response.snapshot();
        let formatted = Arc::new(format(request, &parts, content.as_ref(), &config.api)?);

        self.registry.run_after(request, &formatted).await?;

        Ok((*formatted).clone())
    }

    /// The failure path: classify, format through the same formatter the
    /// success path uses, then run the error hooks. Never fails itself.
    async fn fail(
        &self,
        raw: &Arc<Value>,
        request: Option<&Arc<ApiRequest>>,
        response: &Response,
        err: HandlerError,
    ) -> GatewayResponse {
        if err.is_validation() {
            tracing::info!(error = %err, "invocation failed validation");
        } else {
            tracing::error!(error = %err, "invocation failed");
        }

        let classified = err.classify();
        response.set_status(classified.status);

        let salvaged;
        let request = match request {
            Some(request) => request,
            None => {
                salvaged = Arc::new(lossy_request(raw));
                &salvaged
            }
        };

        let config = self.config.get();
        let parts = response.snapshot();
        let formatted = Arc::new(
            format(request, &parts, Some(&classified.body), &config.api)
                .unwrap_or_else(|_| GatewayResponse::internal_error()),
        );

        let error = Arc::new(err);
        if let Err(hook_err) = self
            .registry
            .run_error_handlers(raw, &error, &formatted)
            .await
        {
            // An error hook cannot re-enter the failure path; the response
            // is already formatted and is returned regardless.
            tracing::error!(error = %hook_err, "error hook failed");
        }

        (*formatted).clone()
    }
}

/// Builder for [`Adapter`].
///
/// Collaborators left unset get fresh defaults, which is enough for a
/// single-adapter process; share explicit `Arc`s when several adapters or
/// registration entry points must observe the same state.
pub struct AdapterBuilder<H> {
    handler: H,
    registry: Option<Arc<MiddlewareRegistry>>,
    config: Option<Arc<ConfigStore>>,
    startup: Option<Arc<StartupRegistry>>,
    unhandled: UnhandledPolicy,
}

impl<H: Handler> AdapterBuilder<H> {
    /// Creates a new builder around `handler`.
    #[must_use]
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            registry: None,
            config: None,
            startup: None,
            unhandled: UnhandledPolicy::default(),
        }
    }

    /// Sets the middleware registry.
    #[must_use]
    pub fn registry(mut self, registry: Arc<MiddlewareRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Sets the configuration store.
    #[must_use]
    pub fn config(mut self, config: Arc<ConfigStore>) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the start-up registry.
    #[must_use]
    pub fn startup(mut self, startup: Arc<StartupRegistry>) -> Self {
        self.startup = Some(startup);
        self
    }

    /// Sets the policy for events no trigger type matches.
    #[must_use]
    pub fn on_unhandled(mut self, policy: UnhandledPolicy) -> Self {
        self.unhandled = policy;
        self
    }

    /// Builds the adapter.
    ///
    /// Building triggers the one-time start-up sequence when a runtime is
    /// available; invocations await its completion either way. Building a
    /// second adapter over the same start-up registry does not re-trigger
    /// it.
    #[must_use]
    pub fn build(self) -> Adapter<H> {
        let startup = self.startup.unwrap_or_default();

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let startup = Arc::clone(&startup);
            handle.spawn(async move {
                // The outcome is cached in the registry; invocations pick
                // up a failure from there.
                let _ = startup.run_once().await;
            });
        }

        Adapter {
            handler: self.handler,
            registry: self.registry.unwrap_or_default(),
            config: self.config.unwrap_or_default(),
            startup,
            unhandled: self.unhandled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use talaria_core::FnHandler;

    fn null_handler() -> impl Handler {
        FnHandler::new(|_request, _response: Response, _ctx| async move { Ok(None) })
    }

    #[tokio::test]
    async fn test_path_parameters_null_counts_as_present() {
        let adapter = Adapter::builder(null_handler()).build();

        let outcome = adapter
            .invoke(json!({"pathParameters": null}), InvocationContext::mock())
            .await
            .unwrap();

        assert!(matches!(outcome, AdapterOutcome::Response(_)));
    }

    #[tokio::test]
    async fn test_missing_path_parameters_is_unhandled() {
        let adapter = Adapter::builder(null_handler()).build();

        let result = adapter.invoke(json!({}), InvocationContext::mock()).await;

        assert!(matches!(result, Err(AdapterError::UnhandledEvent)));
    }

    #[tokio::test]
    async fn test_non_object_event_is_unhandled() {
        let adapter = Adapter::builder(null_handler()).build();

        let result = adapter
            .invoke(json!("ping"), InvocationContext::mock())
            .await;

        assert!(matches!(result, Err(AdapterError::UnhandledEvent)));
    }

    #[tokio::test]
    async fn test_outcome_accessors() {
        let response = GatewayResponse::internal_error();
        assert!(AdapterOutcome::Response(response.clone())
            .into_response()
            .is_some());
        assert!(AdapterOutcome::Response(response).into_passthrough().is_none());
        assert_eq!(
            AdapterOutcome::Passthrough(json!(1)).into_passthrough(),
            Some(json!(1))
        );
    }
}
