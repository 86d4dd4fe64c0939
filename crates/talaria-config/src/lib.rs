//! # Talaria Config
//!
//! Typed configuration for the Talaria adapter, held in a shared store with
//! deep-merge semantics.
//!
//! Configuration is programmatic: business code merges patches onto the
//! store during start-up, and the formatter re-reads the store on every
//! response (configuration is never cached by readers).
//!
//! ```
//! use talaria_config::{AdapterConfig, ConfigStore};
//! use serde_json::json;
//!
//! let store = ConfigStore::new(AdapterConfig::default());
//! store
//!     .merge_value(json!({ "api": { "cors": true, "blacklist": ["password"] } }))
//!     .unwrap();
//! assert!(store.get().api.cors.is_enabled());
//! ```

#![doc(html_root_url = "https://docs.rs/talaria-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod store;

pub use config::{AdapterConfig, ApiConfig, CorsOptions, CorsSetting};
pub use error::ConfigError;
pub use store::ConfigStore;
