//! # Talaria Core
//!
//! Core types and traits for the Talaria invocation adapter.
//!
//! This crate provides the foundational types used throughout Talaria:
//!
//! - [`GatewayEvent`] / [`ApiRequest`] - Inbound trigger payload and its normalized form
//! - [`Response`] - Per-invocation response accumulator handed to handlers
//! - [`GatewayResponse`] - The final wire response returned to the runtime
//! - [`InvocationContext`] / [`RequestId`] - Per-invocation context with a UUID v7 id
//! - [`HandlerError`] - The error taxonomy, with exhaustive classification
//! - [`Handler`] - Core handler trait

#![doc(html_root_url = "https://docs.rs/talaria-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;
mod error;
mod event;
mod handler;
mod response;
pub mod validation;

pub use context::{InvocationContext, RequestId};
pub use error::{Classified, HandlerError, HandlerResult};
pub use event::{ApiRequest, GatewayEvent};
pub use handler::{FnHandler, Handler};
pub use response::{GatewayResponse, HeaderScalar, HeaderValue, Response, ResponseParts};
