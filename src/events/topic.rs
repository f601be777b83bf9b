//! # Out-topic: in-process stream of watchdog events.
//!
//! [`OutTopic`] is a thin wrapper around [`tokio::sync::broadcast`] standing in
//! for the external out-topic. The event client publishes decoded events into it;
//! the listener manager's consumer task reads them back out.
//!
//! ## Architecture
//! ```text
//! Publishers (many):                 Consumer (one per manager):
//!   event client ──┐
//!   tests        ──┼──────► OutTopic ───────► ListenerManager::spawn_consumer
//!   replay tool  ──┘  (broadcast chan)              └─► process_event(&ev)
//! ```
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks.
//! - **Bounded capacity**: a single ring buffer stores recent events for all receivers.
//! - **Lag handling**: slow receivers get `RecvError::Lagged(n)` and skip `n` oldest items.
//! - **No persistence**: events are lost if there are no receivers at send time.

use tokio::sync::broadcast;

use super::event::WatchdogEvent;
use crate::config::ManagerConfig;

/// Broadcast channel for watchdog events.
///
/// Cheap to clone; clones publish into the same channel.
#[derive(Clone, Debug)]
pub struct OutTopic {
    tx: broadcast::Sender<WatchdogEvent>,
}

impl OutTopic {
    /// Creates a new topic with the given channel capacity (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<WatchdogEvent>(capacity);
        Self { tx }
    }

    /// Creates a topic sized by [`ManagerConfig::topic_capacity`].
    pub fn from_config(cfg: &ManagerConfig) -> Self {
        Self::new(cfg.topic_capacity)
    }

    /// Publishes an event to all current receivers.
    ///
    /// Returns the number of receivers the event reached; `0` means it was dropped.
    pub fn publish(&self, ev: WatchdogEvent) -> usize {
        self.tx.send(ev).unwrap_or(0)
    }

    /// Creates a receiver that observes events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<WatchdogEvent> {
        self.tx.subscribe()
    }

    /// Number of live receivers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
