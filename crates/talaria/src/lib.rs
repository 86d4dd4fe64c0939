//! # Talaria
//!
//! **Function-invocation adapter for event-driven runtimes**
//!
//! Talaria sits between a Lambda-shaped event runtime and your business
//! callback: it normalizes the inbound trigger into a typed request, runs
//! your callback, and synthesizes a well-formed response, with
//!
//! - a middleware hook system with strict cross-scope ordering,
//! - status-code inference and header partitioning,
//! - cross-origin header synthesis from configuration,
//! - recursive field redaction at serialize time,
//! - a closed error taxonomy classified into complete responses,
//! - a one-time concurrent start-up sequence.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use serde_json::json;
//! use talaria::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let adapter = Adapter::builder(FnHandler::new(
//!         |request: Arc<ApiRequest>, _response: Response, _ctx: Arc<InvocationContext>| async move {
//!             Ok::<_, HandlerError>(request.body.clone())
//!         },
//!     ))
//!     .build();
//!
//!     let outcome = adapter
//!         .invoke(
//!             json!({"httpMethod": "POST", "body": "{}", "pathParameters": null}),
//!             InvocationContext::new(),
//!         )
//!         .await
//!         .expect("gateway events always format a response");
//!     println!("{outcome:?}");
//! }
//! ```
//!
//! ## Data flow
//!
//! ```text
//! raw event -> normalize -> before hooks (global, gateway) -> handler
//!           -> format -> after hooks (gateway, global) -> final response
//!
//! on failure: classify -> format -> error hooks (gateway, global) -> final response
//! ```

#![doc(html_root_url = "https://docs.rs/talaria/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use talaria_core as core;

// Re-export the gateway pipeline
pub use talaria_gateway as gateway;

// Re-export middleware types
pub use talaria_middleware as middleware;

// Re-export the configuration store
pub use talaria_config as config;

// Re-export the start-up registry
pub use talaria_init as init;

// Re-export the persistence layer
pub use talaria_store as store;

// Re-export telemetry setup
pub use talaria_telemetry as telemetry;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```
/// use talaria::prelude::*;
/// ```
pub mod prelude {
    pub use talaria_core::{
        ApiRequest, FnHandler, GatewayEvent, GatewayResponse, Handler, HandlerError,
        HandlerResult, HeaderScalar, HeaderValue, InvocationContext, RequestId, Response,
    };

    pub use talaria_gateway::{
        Adapter, AdapterBuilder, AdapterError, AdapterOutcome, UnhandledPolicy,
    };

    pub use talaria_middleware::{
        after_hook, before_hook, error_hook, MiddlewareRegistry, Scope,
    };

    pub use talaria_config::{AdapterConfig, ApiConfig, ConfigStore, CorsOptions, CorsSetting};

    pub use talaria_init::{InitError, StartupRegistry};

    pub use talaria_store::{MemoryStore, Record, Repository, StoreError, TableStore};

    pub use talaria_telemetry::{init_logging, LogConfig};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_prelude_covers_an_end_to_end_invocation() {
        let config = Arc::new(ConfigStore::default());
        config
            .merge_value(json!({"api": {"blacklist": ["password"]}}))
            .unwrap();

        let adapter = Adapter::builder(FnHandler::new(|_request, _response, _ctx| async move {
            Ok(Some(json!({"email": "a@b.com", "password": "secret"})))
        }))
        .config(config)
        .build();

        let response = adapter
            .invoke(
                json!({"httpMethod": "GET", "pathParameters": null}),
                InvocationContext::new(),
            )
            .await
            .unwrap()
            .into_response()
            .unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "{\"email\":\"a@b.com\"}");
    }
}
