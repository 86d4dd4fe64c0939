//! # Talaria Init
//!
//! Start-up initializer registry for the Talaria adapter.
//!
//! Business code registers any number of initializers before the first
//! invocation (warm connections, prime caches). The adapter awaits
//! [`StartupRegistry::run_once`] at the top of every invocation: the first
//! caller triggers all initializers concurrently, everyone else awaits the
//! same outcome. The outcome is cached, success or failure; initializers
//! never run twice.
//!
//! ```
//! use std::sync::Arc;
//! use talaria_init::StartupRegistry;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let registry = Arc::new(StartupRegistry::new());
//! registry
//!     .register(|| async move {
//!         // Warm up a connection pool here.
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! registry.run_once().await.unwrap();
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/talaria-init/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod registry;

pub use error::{InitError, InitResult};
pub use registry::{InitFuture, Initializer, StartupRegistry};
