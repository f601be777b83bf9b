//! # Out-topic consumer loop.
//!
//! Drains a broadcast receiver (usually from [`OutTopic::subscribe`](crate::OutTopic::subscribe))
//! and hands every event to [`ListenerManager::process_event`].
//!
//! ## Architecture
//! ```text
//! OutTopic ──► rx.recv() ──► ListenerManager::process_event(&ev)
//!                 │                 ├─ Ok(report)        → trace
//!                 │                 └─ Err(InvalidEvent) → warn, continue
//!                 ├─ Lagged(n) → warn, continue
//!                 └─ Closed    → exit
//! token.cancelled() ─────────────────────────────────────► exit
//! ```

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::events::WatchdogEvent;
use crate::manager::registry::ListenerManager;

impl ListenerManager {
    /// Spawns the event consumer loop on the current tokio runtime.
    ///
    /// The loop ends when `token` is cancelled or every sender of the topic is dropped.
    /// An event already being dispatched when `token` fires is finished first.
    pub fn spawn_consumer(
        self: Arc<Self>,
        mut rx: broadcast::Receiver<WatchdogEvent>,
        token: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    msg = rx.recv() => match msg {
                        Ok(ev) => self.consume(&ev).await,
                        Err(broadcast::error::RecvError::Closed) => break,
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(
                                engine = %self.config().engine_name,
                                skipped,
                                "watchdog consumer lagged behind the out-topic"
                            );
                            continue;
                        }
                    }
                }
            }
            tracing::debug!(engine = %self.config().engine_name, "watchdog consumer stopped");
        })
    }

    async fn consume(&self, ev: &WatchdogEvent) {
        match self.process_event(ev).await {
            Ok(report) => {
                tracing::trace!(
                    engine = %self.config().engine_name,
                    event = %ev,
                    delivered = report.delivered.len(),
                    failed = report.failures.len(),
                    skipped = report.skipped,
                    "watchdog event dispatched"
                );
            }
            Err(err) => {
                tracing::warn!(
                    engine = %self.config().engine_name,
                    error_kind = err.as_label(),
                    error = %err.as_message(),
                    event = %ev,
                    "watchdog event rejected"
                );
            }
        }
    }
}
