//! # Per-listener delivery with failure isolation.
//!
//! [`deliver`] invokes one listener and converts both `Err` returns and panics
//! into a [`ListenerError`]. [`DispatchReport`] summarizes one `process_event` call.
//!
//! ## Panic handling
//! The listener call, including construction of its future, is wrapped in `catch_unwind`:
//! - Panic is caught and converted to `ListenerError::Panicked`
//! - Dispatch continues with the next listener
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state inconsistent
//! if a listener uses `Arc<Mutex<T>>` and panics while holding the lock.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use crate::error::ListenerError;
use crate::events::{WatchdogEvent, WatchdogEventType};
use crate::listeners::WatchdogListener;

/// Runs `listener` on `event`, catching panics.
pub(crate) async fn deliver(
    listener: &dyn WatchdogListener,
    event: &WatchdogEvent,
) -> Result<(), ListenerError> {
    // Building the future runs listener code too, so it happens inside the guard.
    match AssertUnwindSafe(async move { listener.process_event(event).await })
        .catch_unwind()
        .await
    {
        Ok(res) => res,
        Err(panic_err) => Err(ListenerError::Panicked {
            message: panic_message(&*panic_err),
        }),
    }
}

fn panic_message(any: &(dyn Any + Send)) -> String {
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// A listener that failed while handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerFailure {
    /// Id of the failing listener.
    pub listener_id: Arc<str>,
    /// Type of the event being delivered.
    pub event_type: WatchdogEventType,
    /// What went wrong.
    pub error: ListenerError,
}

/// Outcome of one [`ListenerManager::process_event`](crate::ListenerManager::process_event) call.
///
/// Order of `delivered` and `failures` follows registry iteration order, which is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Listeners whose callback completed successfully.
    pub delivered: Vec<Arc<str>>,
    /// Listeners whose filter did not match.
    pub skipped: usize,
    /// Listeners whose callback failed or panicked.
    pub failures: Vec<ListenerFailure>,
}

impl DispatchReport {
    /// Number of listeners whose callback was invoked (succeeded or failed).
    pub fn attempted(&self) -> usize {
        self.delivered.len() + self.failures.len()
    }

    /// `true` when the listener with `listener_id` completed successfully.
    pub fn was_delivered(&self, listener_id: &str) -> bool {
        self.delivered.iter().any(|id| &**id == listener_id)
    }

    /// `true` when no callback failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;

    use super::*;
    use crate::events::ElementHeader;
    use crate::listeners::ListenerFn;

    fn event() -> WatchdogEvent {
        WatchdogEvent::element(WatchdogEventType::NewElement, ElementHeader::new("g", "Asset"))
    }

    #[tokio::test]
    async fn test_deliver_passes_through_error() {
        let l =
            ListenerFn::new(|_ev: &WatchdogEvent| Err(ListenerError::new("store_offline", "down")));
        let err = deliver(&l, &event()).await.unwrap_err();
        assert_eq!(err.as_label(), "store_offline");
        assert_eq!(err.as_message(), "down");
    }

    #[tokio::test]
    async fn test_deliver_catches_str_panic() {
        let l = ListenerFn::new(|_ev: &WatchdogEvent| -> Result<(), ListenerError> {
            panic!("boom")
        });
        let err = deliver(&l, &event()).await.unwrap_err();
        assert_eq!(
            err,
            ListenerError::Panicked {
                message: "boom".into()
            }
        );
    }

    #[tokio::test]
    async fn test_deliver_catches_formatted_panic() {
        let l = ListenerFn::new(|ev: &WatchdogEvent| -> Result<(), ListenerError> {
            panic!("bad subject {}", ev.subject.as_ref().map(|s| s.guid.as_str()).unwrap_or("-"))
        });
        let err = deliver(&l, &event()).await.unwrap_err();
        assert_eq!(err.as_message(), "bad subject g");
    }

    /// Hand-written (non-`#[async_trait]`) impl that panics before returning its future.
    struct PanicsOnCall;

    impl WatchdogListener for PanicsOnCall {
        fn process_event<'life0, 'life1, 'async_trait>(
            &'life0 self,
            _event: &'life1 WatchdogEvent,
        ) -> Pin<Box<dyn Future<Output = Result<(), ListenerError>> + Send + 'async_trait>>
        where
            'life0: 'async_trait,
            'life1: 'async_trait,
            Self: 'async_trait,
        {
            panic!("failed before the future was built")
        }
    }

    #[tokio::test]
    async fn test_deliver_catches_panic_while_building_future() {
        let err = deliver(&PanicsOnCall, &event()).await.unwrap_err();
        assert_eq!(
            err,
            ListenerError::Panicked {
                message: "failed before the future was built".into()
            }
        );
    }

    #[test]
    fn test_report_counts() {
        let mut report = DispatchReport {
            delivered: vec![Arc::from("a")],
            skipped: 2,
            failures: Vec::new(),
        };
        assert!(report.is_clean());
        assert_eq!(report.attempted(), 1);
        assert!(report.was_delivered("a"));
        assert!(!report.was_delivered("b"));

        report.failures.push(ListenerFailure {
            listener_id: Arc::from("b"),
            event_type: WatchdogEventType::NewElement,
            error: ListenerError::msg("down"),
        });
        assert!(!report.is_clean());
        assert_eq!(report.attempted(), 2);
    }
}
