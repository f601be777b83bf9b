//! # Watchdog listener trait.
//!
//! Provides [`WatchdogListener`], the single capability a registered listener has:
//! receive an event.
//!
//! ## Rules
//! - Listeners are invoked one after another by the dispatcher; a slow listener
//!   delays the listeners iterated after it.
//! - Errors and panics are caught by the dispatcher, logged, and reported in the
//!   [`DispatchReport`](crate::DispatchReport); they never reach the event source.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use govwatch::{ListenerError, WatchdogEvent, WatchdogEventType, WatchdogListener};
//!
//! struct QualityCheck;
//!
//! #[async_trait]
//! impl WatchdogListener for QualityCheck {
//!     async fn process_event(&self, ev: &WatchdogEvent) -> Result<(), ListenerError> {
//!         if ev.event_type == Some(WatchdogEventType::NewElement) {
//!             // kick off a governance action, etc.
//!         }
//!         Ok(())
//!     }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ListenerError;
use crate::events::WatchdogEvent;

/// Shared handle to a listener.
pub type ListenerRef = Arc<dyn WatchdogListener>;

/// Receiver of watchdog events.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Report failures through `Err`; panics are caught but should be avoided.
/// - Do not rely on delivery order relative to other listeners.
#[async_trait]
pub trait WatchdogListener: Send + Sync + 'static {
    /// Handles a single event that passed this listener's interest filter.
    async fn process_event(&self, event: &WatchdogEvent) -> Result<(), ListenerError>;
}
