//! Watchdog events: types and the out-topic stream.
//!
//! This module groups the event **data model** and the **topic** used to move
//! events from the external event client to the listener manager.
//!
//! ## Contents
//! - [`WatchdogEventType`], [`WatchdogEvent`], [`ElementHeader`], [`EventBody`] event model
//! - [`OutTopic`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: the out-topic event client (external), tests, demos.
//! - **Consumers**: `ListenerManager::spawn_consumer()`, or any caller of
//!   `ListenerManager::process_event()` directly.

mod event;
mod topic;

pub use event::{ElementHeader, EventBody, WatchdogEvent, WatchdogEventType};
pub use topic::OutTopic;
