//! Attune Core
//!
//! Shared primitives for the Attune accessibility widget.
//! Zero external dependencies.
//!
//! Features:
//! - Publish/subscribe observable with unsubscribe handles
//! - Cancelable single-shot deferred tasks

mod defer;
mod observe;

pub use defer::{Scheduler, TaskHandle};
pub use observe::{Observable, Subscription};
