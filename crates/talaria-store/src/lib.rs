//! # Talaria Store
//!
//! A thin repository-style persistence layer over a pluggable table store.
//!
//! The [`TableStore`] trait is the seam to the actual storage engine; the
//! bundled [`MemoryStore`] backs tests and local development. A
//! [`Repository`] pairs a store with a [`Record`] type and provides the
//! usual create/find/update/destroy surface: keys are assigned as UUIDs
//! when absent and records are stamped with creation and update times.
//!
//! ```
//! use std::sync::Arc;
//! use serde::{Deserialize, Serialize};
//! use talaria_store::{MemoryStore, Record, Repository};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct User {
//!     id: Option<String>,
//!     email: String,
//! }
//!
//! impl Record for User {
//!     const TABLE: &'static str = "users";
//!
//!     fn key(&self) -> Option<String> {
//!         self.id.clone()
//!     }
//!
//!     fn set_key(&mut self, key: String) {
//!         self.id = Some(key);
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let repository = Repository::<User>::new(Arc::new(MemoryStore::new()));
//! let user = repository
//!     .create(User { id: None, email: "a@b.example".into() })
//!     .await
//!     .unwrap();
//! assert!(user.id.is_some());
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/talaria-store/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod record;
mod repository;
mod store;

pub use error::{StoreError, StoreResult};
pub use record::Record;
pub use repository::Repository;
pub use store::{Document, MemoryStore, TableStore};
