//! # Talaria Gateway
//!
//! The invocation pipeline for gateway-shaped events: event normalization,
//! response synthesis (status inference, header partitioning, cross-origin
//! headers, field redaction), error-path formatting, and the orchestrating
//! [`Adapter`].
//!
//! ## Data flow
//!
//! ```text
//! raw event -> normalize -> before hooks (global, gateway) -> handler
//!           -> format -> after hooks (gateway, global) -> final response
//!
//! on failure: classify -> format -> error hooks (gateway, global) -> final response
//! ```
//!
//! Every gateway invocation terminates in a complete [`GatewayResponse`];
//! only non-gateway events under the strict unhandled policy and start-up
//! failures surface an [`AdapterError`] to the hosting runtime.
//!
//! [`GatewayResponse`]: talaria_core::GatewayResponse

#![doc(html_root_url = "https://docs.rs/talaria-gateway/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod adapter;
mod cors;
mod error;
mod format;
mod normalize;
mod redact;

pub use adapter::{Adapter, AdapterBuilder, AdapterOutcome, UnhandledPolicy};
pub use cors::{cors_headers, DEFAULT_METHODS};
pub use error::AdapterError;
pub use format::format;
pub use normalize::normalize;
pub use redact::{to_redacted_string, Redacted};
