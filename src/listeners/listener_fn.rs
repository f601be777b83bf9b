//! # Function-backed listener (`ListenerFn`)
//!
//! [`ListenerFn`] wraps a closure `F: Fn(&WatchdogEvent) -> Result<(), ListenerError>`.
//! The closure runs synchronously inside the dispatcher; use an explicit
//! [`WatchdogListener`] implementation when the handler needs to await.
//!
//! ## Example
//! ```rust
//! use govwatch::{ListenerFn, ListenerRef, ListenerError, WatchdogEvent};
//!
//! let l: ListenerRef = ListenerFn::arc(|ev: &WatchdogEvent| {
//!     println!("received {ev}");
//!     Ok::<_, ListenerError>(())
//! });
//! ```

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ListenerError;
use crate::events::WatchdogEvent;
use crate::listeners::listener::WatchdogListener;

/// Function-backed listener implementation.
pub struct ListenerFn<F> {
    f: F,
}

impl<F> ListenerFn<F>
where
    F: Fn(&WatchdogEvent) -> Result<(), ListenerError> + Send + Sync + 'static,
{
    /// Creates a new function-backed listener.
    ///
    /// Prefer [`ListenerFn::arc`] when you immediately need a [`ListenerRef`](crate::ListenerRef).
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the listener and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

impl<F> fmt::Debug for ListenerFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerFn").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F> WatchdogListener for ListenerFn<F>
where
    F: Fn(&WatchdogEvent) -> Result<(), ListenerError> + Send + Sync + 'static,
{
    async fn process_event(&self, event: &WatchdogEvent) -> Result<(), ListenerError> {
        (self.f)(event)
    }
}
