//! The middleware registry and phase dispatchers.

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use talaria_core::{ApiRequest, GatewayResponse, HandlerError, InvocationContext};

use crate::hook::{AfterHook, BeforeHook, ErrorHook, HookResult};

/// A middleware registration bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Applies to every invocation regardless of trigger type.
    Global,
    /// Applies to gateway-shaped events only.
    Gateway,
}

#[derive(Default)]
struct ScopeHooks {
    before: Vec<BeforeHook>,
    after: Vec<AfterHook>,
    error: Vec<ErrorHook>,
}

#[derive(Default)]
struct Registrations {
    global: ScopeHooks,
    gateway: ScopeHooks,
}

impl Registrations {
    fn scope_mut(&mut self, scope: Scope) -> &mut ScopeHooks {
        match scope {
            Scope::Global => &mut self.global,
            Scope::Gateway => &mut self.gateway,
        }
    }
}

/// The process-wide store of ordered hook lists.
///
/// The registry is an explicit object: construct it once, share it by `Arc`
/// between the registration entry points and the adapter. Registration is
/// last-write-wins per scope and phase; the lists are resolved at dispatch
/// time, so a registration made after an adapter was built is still
/// observed by its next invocation.
///
/// Registration is intended as a start-up-time operation. Dispatch takes one
/// consistent snapshot of both scope lists at the start of each phase;
/// a registration racing an in-flight phase affects the following phase.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use talaria_middleware::{before_hook, MiddlewareRegistry, Scope};
///
/// let registry = Arc::new(MiddlewareRegistry::new());
/// registry.set_before(
///     Scope::Global,
///     vec![before_hook(|_request, _ctx| async move { Ok(()) })],
/// );
/// ```
#[derive(Default)]
pub struct MiddlewareRegistry {
    inner: RwLock<Registrations>,
}

impl MiddlewareRegistry {
    /// Creates an empty registry: all scopes and phases start with no hooks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the before-phase hooks for `scope`.
    pub fn set_before(&self, scope: Scope, hooks: Vec<BeforeHook>) {
        tracing::debug!(?scope, count = hooks.len(), "registering before hooks");
        self.inner.write().scope_mut(scope).before = hooks;
    }

    /// Replaces the after-phase hooks for `scope`.
    pub fn set_after(&self, scope: Scope, hooks: Vec<AfterHook>) {
        tracing::debug!(?scope, count = hooks.len(), "registering after hooks");
        self.inner.write().scope_mut(scope).after = hooks;
    }

    /// Replaces the error-phase hooks for `scope`.
    pub fn set_error_handlers(&self, scope: Scope, hooks: Vec<ErrorHook>) {
        tracing::debug!(?scope, count = hooks.len(), "registering error hooks");
        self.inner.write().scope_mut(scope).error = hooks;
    }

    /// Runs the before phase: the global list fully, then the gateway list.
    ///
    /// Hooks run sequentially, each awaited. A failure aborts the remaining
    /// hooks and is returned to the caller.
    pub async fn run_before(
        &self,
        request: &Arc<ApiRequest>,
        ctx: &Arc<InvocationContext>,
    ) -> HookResult {
        let (global, gateway) = {
            let registrations = self.inner.read();
            (
                registrations.global.before.clone(),
                registrations.gateway.before.clone(),
            )
        };

        for hook in global.iter().chain(gateway.iter()) {
            hook(Arc::clone(request), Arc::clone(ctx)).await?;
        }
        Ok(())
    }

    /// Runs the after phase: the gateway list fully, then the global list.
    ///
    /// Success path only; runs once the response has been formatted.
    pub async fn run_after(
        &self,
        request: &Arc<ApiRequest>,
        response: &Arc<GatewayResponse>,
    ) -> HookResult {
        let (global, gateway) = {
            let registrations = self.inner.read();
            (
                registrations.global.after.clone(),
                registrations.gateway.after.clone(),
            )
        };

        for hook in gateway.iter().chain(global.iter()) {
            hook(Arc::clone(request), Arc::clone(response)).await?;
        }
        Ok(())
    }

    /// Runs the error phase: the gateway list fully, then the global list.
    ///
    /// Failure path only; runs after the error has been classified and
    /// formatted. The caller decides what to do with a failing error hook.
    pub async fn run_error_handlers(
        &self,
        event: &Arc<Value>,
        error: &Arc<HandlerError>,
        response: &Arc<GatewayResponse>,
    ) -> HookResult {
        let (global, gateway) = {
            let registrations = self.inner.read();
            (
                registrations.global.error.clone(),
                registrations.gateway.error.clone(),
            )
        };

        for hook in gateway.iter().chain(global.iter()) {
            hook(Arc::clone(event), Arc::clone(error), Arc::clone(response)).await?;
        }
        Ok(())
    }
}
