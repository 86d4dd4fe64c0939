//! The start-up registry.

use std::future::Future;
use std::sync::Arc;

use futures_util::future::{try_join_all, BoxFuture};
use parking_lot::Mutex;
use tokio::sync::OnceCell;

use crate::{InitError, InitResult};

/// A boxed initializer future.
pub type InitFuture = BoxFuture<'static, InitResult<()>>;

/// A registered initializer callback.
pub type Initializer = Arc<dyn Fn() -> InitFuture + Send + Sync>;

/// A registry of one-time start-up initializers.
///
/// Initializers registered here run exactly once per process, concurrently
/// with each other, the first time [`run_once`](Self::run_once) is awaited.
/// The combined outcome resolves only when all initializers complete and
/// fails on the first failure; the outcome is cached either way.
#[derive(Default)]
pub struct StartupRegistry {
    initializers: Mutex<Vec<Initializer>>,
    outcome: OnceCell<Result<(), Arc<InitError>>>,
}

impl StartupRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an initializer.
    ///
    /// # Errors
    ///
    /// Returns [`InitError::AlreadyRan`] when the start-up sequence has
    /// already been triggered; a late initializer would otherwise silently
    /// never run.
    pub fn register<F, Fut>(&self, initializer: F) -> InitResult<()>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = InitResult<()>> + Send + 'static,
    {
        if self.outcome.initialized() {
            return Err(InitError::AlreadyRan);
        }
        self.initializers
            .lock()
            .push(Arc::new(move || Box::pin(initializer())));
        Ok(())
    }

    /// Returns the number of registered initializers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.initializers.lock().len()
    }

    /// Returns `true` when no initializers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.initializers.lock().is_empty()
    }

    /// Returns `true` once the start-up sequence has been triggered.
    #[must_use]
    pub fn has_run(&self) -> bool {
        self.outcome.initialized()
    }

    /// Runs all registered initializers, once.
    ///
    /// The first caller triggers the run; concurrent and subsequent callers
    /// await the same cached outcome. Initializers execute concurrently and
    /// the run fails on the first failure.
    pub async fn run_once(&self) -> Result<(), Arc<InitError>> {
        self.outcome
            .get_or_init(|| async {
                let initializers: Vec<Initializer> = self.initializers.lock().clone();
                tracing::debug!(count = initializers.len(), "running start-up initializers");

                try_join_all(initializers.iter().map(|initializer| initializer()))
                    .await
                    .map(|_| ())
                    .map_err(|err| {
                        tracing::error!(error = %err, "start-up initializer failed");
                        Arc::new(err)
                    })
            })
            .await
            .clone()
    }
}
