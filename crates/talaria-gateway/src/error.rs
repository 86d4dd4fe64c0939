//! Adapter-boundary error types.

use std::sync::Arc;

use talaria_core::HandlerError;
use talaria_init::InitError;
use thiserror::Error;

/// Errors that escape the adapter to the hosting runtime.
///
/// Gateway-shaped events never produce one of these: their failures are
/// classified into complete responses. What remains is the strict-mode
/// rejection of events no trigger type matched, failures of the one-time
/// start-up sequence, and failures of the raw passthrough callback.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// No trigger type matched the event and the adapter runs the strict
    /// unhandled policy.
    #[error("unhandled event")]
    UnhandledEvent,

    /// The one-time start-up sequence failed. The outcome is cached; every
    /// invocation observes the same failure.
    #[error("start-up failed")]
    Startup(#[source] Arc<InitError>),

    /// The raw passthrough callback failed.
    #[error("passthrough handler failed")]
    Passthrough(#[source] HandlerError),
}
