//! # Talaria Telemetry
//!
//! Structured logging for the Talaria adapter, integrating with the
//! tracing-subscriber ecosystem.
//!
//! ```rust,no_run
//! use talaria_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::default()).expect("logging init");
//! tracing::info!(http.method = "POST", "Processing invocation");
//! ```

#![doc(html_root_url = "https://docs.rs/talaria-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{fields, init_logging, LogConfig};
