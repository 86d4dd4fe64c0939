//! # Talaria Middleware
//!
//! Scoped hook registry and dispatcher for the Talaria invocation adapter.
//!
//! Hooks are registered in two scopes ([`Scope::Global`] applies to every
//! invocation, [`Scope::Gateway`] to gateway-shaped events only) for three
//! phases: before, after, and error. Registration replaces the previous list
//! for a scope; dispatch runs hooks sequentially in a fixed cross-scope
//! order:
//!
//! - before: global list, then gateway list
//! - after: gateway list, then global list
//! - error: gateway list, then global list
//!
//! The dispatcher ignores hook return values beyond failure: a hook that
//! fails aborts the remainder of its phase and the failure propagates to the
//! pipeline.

#![doc(html_root_url = "https://docs.rs/talaria-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod hook;
mod registry;

pub use hook::{
    after_hook, before_hook, error_hook, AfterHook, BeforeHook, BoxFuture, ErrorHook, HookResult,
};
pub use registry::{MiddlewareRegistry, Scope};
