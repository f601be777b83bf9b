//! # Listener manager: registry and dispatcher for watchdog listeners.
//!
//! [`ListenerManager`] owns the map from listener id to [`ListenerSpec`] and
//! delivers each inbound event to the listeners whose filter matches.
//!
//! ## Architecture
//! ```text
//! register(spec) ──┐
//! remove(id)     ──┼──► RwLock<HashMap<id, Arc<ListenerSpec>>>
//!                  │                    │
//! process_event(ev)│        read lock: clone Arc snapshot
//!   ├─► ev.validate()?  (InvalidEvent → caller, nothing delivered)
//!   └─► for spec in snapshot (no lock held):
//!          ├─ filter.matches? no  ──► skipped += 1
//!          └─ yes ──► deliver(listener, ev)
//!                       ├─ Ok    ──► delivered
//!                       └─ Err   ──► tracing::error!(...) + failures
//! ```
//!
//! ## Rules
//! - At most one registration per listener id; re-registering swaps the whole spec.
//! - Validation runs once per event, before any listener is invoked.
//! - Listeners are awaited one at a time; no timeouts.
//! - A listener removed before `process_event` starts is never invoked by it.
//! - Listeners may register/remove other listeners from inside a callback.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::ManagerConfig;
use crate::error::WatchdogError;
use crate::events::{WatchdogEvent, WatchdogEventType};
use crate::listeners::{InterestFilter, ListenerRef};
use crate::manager::dispatch::{DispatchReport, ListenerFailure, deliver};
use crate::manager::spec::ListenerSpec;

/// Registry of watchdog listeners and dispatcher of watchdog events.
pub struct ListenerManager {
    cfg: ManagerConfig,
    listeners: RwLock<HashMap<Arc<str>, Arc<ListenerSpec>>>,
}

impl ListenerManager {
    /// Creates an empty manager.
    pub fn new(cfg: ManagerConfig) -> Self {
        Self {
            cfg,
            listeners: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the manager configuration.
    pub fn config(&self) -> &ManagerConfig {
        &self.cfg
    }

    /// Inserts or replaces the registration for `spec.listener_id()`.
    pub fn register(&self, spec: ListenerSpec) {
        let id = spec.id_arc();
        let replaced = self
            .listeners
            .write()
            .insert(Arc::clone(&id), Arc::new(spec))
            .is_some();
        tracing::debug!(
            engine = %self.cfg.engine_name,
            listener_id = %id,
            replaced,
            "watchdog listener registered"
        );
    }

    /// Registers `listener` under `listener_id` with the given interest.
    ///
    /// `None` (or an empty list) for either type list means "any".
    ///
    /// ### Errors
    /// [`WatchdogError::InvalidConfiguration`] naming `listener_id` when the id is empty.
    pub fn register_listener(
        &self,
        listener_id: impl Into<Arc<str>>,
        listener: ListenerRef,
        interesting_event_types: Option<Vec<WatchdogEventType>>,
        interesting_metadata_types: Option<Vec<String>>,
        specific_instance: Option<String>,
    ) -> Result<(), WatchdogError> {
        let mut filter = InterestFilter::new();
        if let Some(types) = interesting_event_types {
            filter = filter.event_types(types);
        }
        if let Some(types) = interesting_metadata_types {
            filter = filter.metadata_types(types);
        }
        if let Some(guid) = specific_instance {
            filter = filter.specific_instance(guid);
        }
        self.register(ListenerSpec::new(listener_id, listener, filter)?);
        Ok(())
    }

    /// Removes the registration for `listener_id`.
    ///
    /// Returns `false` (and changes nothing) when no such registration exists.
    pub fn remove(&self, listener_id: &str) -> bool {
        let removed = self.listeners.write().remove(listener_id).is_some();
        if removed {
            tracing::debug!(
                engine = %self.cfg.engine_name,
                listener_id,
                "watchdog listener removed"
            );
        }
        removed
    }

    /// Removes every registration.
    pub fn clear(&self) {
        self.listeners.write().clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }

    pub fn contains(&self, listener_id: &str) -> bool {
        self.listeners.read().contains_key(listener_id)
    }

    /// Snapshot of registered ids, in no particular order.
    pub fn listener_ids(&self) -> Vec<Arc<str>> {
        self.listeners.read().keys().cloned().collect()
    }

    fn snapshot(&self) -> Vec<Arc<ListenerSpec>> {
        self.listeners.read().values().cloned().collect()
    }

    /// Delivers `event` to every registered listener whose filter matches.
    ///
    /// ### Errors
    /// [`WatchdogError::InvalidEvent`] when the event has no recognized type or
    /// no subject; in that case no listener is invoked. Listener failures are
    /// never returned here: they are logged and listed in the report.
    pub async fn process_event(
        &self,
        event: &WatchdogEvent,
    ) -> Result<DispatchReport, WatchdogError> {
        let (event_type, subject) = event.validate()?;
        let mut report = DispatchReport::default();

        for spec in self.snapshot() {
            if !spec.filter().matches(event_type, subject) {
                report.skipped += 1;
                continue;
            }

            match deliver(&**spec.listener(), event).await {
                Ok(()) => report.delivered.push(spec.id_arc()),
                Err(error) => {
                    tracing::error!(
                        engine = %self.cfg.engine_name,
                        listener_id = %spec.listener_id(),
                        event_type = %event_type,
                        error_kind = error.as_label(),
                        error = error.as_message(),
                        event = %event,
                        "watchdog listener failed to process event"
                    );
                    report.failures.push(ListenerFailure {
                        listener_id: spec.id_arc(),
                        event_type,
                        error,
                    });
                }
            }
        }
        Ok(report)
    }
}

impl Default for ListenerManager {
    fn default() -> Self {
        Self::new(ManagerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tracing::field::{Field, Visit};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use crate::error::ListenerError;
    use crate::events::ElementHeader;
    use crate::listeners::ListenerFn;

    fn counting() -> (ListenerRef, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let l: ListenerRef = ListenerFn::arc(move |_ev: &WatchdogEvent| {
            h.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        (l, hits)
    }

    fn failing(msg: &'static str) -> ListenerRef {
        ListenerFn::arc(move |_ev: &WatchdogEvent| Err(ListenerError::new("runtime_error", msg)))
    }

    fn element(event_type: WatchdogEventType, guid: &str, type_name: &str) -> WatchdogEvent {
        WatchdogEvent::element(event_type, ElementHeader::new(guid, type_name))
    }

    fn asset_created(guid: &str) -> WatchdogEvent {
        element(WatchdogEventType::NewElement, guid, "Asset")
    }

    #[tokio::test]
    async fn test_metadata_type_filter() {
        let mgr = ListenerManager::default();
        let (l1, hits) = counting();
        mgr.register_listener("L1", l1, None, Some(vec!["Asset".into()]), None)
            .unwrap();

        mgr.process_event(&asset_created("g1")).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        let report = mgr
            .process_event(&element(WatchdogEventType::NewElement, "g2", "Process"))
            .await
            .unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(report.skipped, 1);
    }

    #[tokio::test]
    async fn test_specific_instance_wins_over_type_filter() {
        let mgr = ListenerManager::default();
        let (l2, hits) = counting();
        mgr.register_listener(
            "L2",
            l2,
            None,
            Some(vec!["GlossaryTerm".into()]),
            Some("guid-123".into()),
        )
        .unwrap();

        let report = mgr
            .process_event(&element(
                WatchdogEventType::UpdatedElementProperties,
                "guid-123",
                "Process",
            ))
            .await
            .unwrap();
        assert!(report.was_delivered("L2"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_event_type_gate() {
        let mgr = ListenerManager::default();
        let (l3, hits) = counting();
        mgr.register_listener("L3", l3, Some(vec![WatchdogEventType::NewElement]), None, None)
            .unwrap();

        mgr.process_event(&element(WatchdogEventType::DeletedElement, "g1", "Asset"))
            .await
            .unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        mgr.process_event(&asset_created("g1")).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reregister_replaces_filter() {
        let mgr = ListenerManager::default();
        let (l4, hits) = counting();
        mgr.register_listener("L4", l4.clone(), None, Some(vec!["Asset".into()]), None)
            .unwrap();
        mgr.register_listener("L4", l4, None, Some(vec!["Comment".into()]), None)
            .unwrap();
        assert_eq!(mgr.len(), 1);

        mgr.process_event(&asset_created("g1")).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        mgr.process_event(&element(WatchdogEventType::NewElement, "g2", "Comment"))
            .await
            .unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reregister_replaces_listener() {
        let mgr = ListenerManager::default();
        let (old, old_hits) = counting();
        let (new, new_hits) = counting();
        mgr.register_listener("L", old, None, None, None).unwrap();
        mgr.register_listener("L", new, None, None, None).unwrap();

        mgr.process_event(&asset_created("g1")).await.unwrap();
        assert_eq!(old_hits.load(Ordering::SeqCst), 0);
        assert_eq!(new_hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failing_listener_is_isolated() {
        let mgr = ListenerManager::new(ManagerConfig::for_engine("AssetQuality"));
        let (l6, hits) = counting();
        mgr.register_listener("L5", failing("boom"), None, None, None).unwrap();
        mgr.register_listener("L6", l6, None, None, None).unwrap();

        let report = mgr.process_event(&asset_created("g1")).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(report.attempted(), 2);
        assert!(report.was_delivered("L6"));
        assert_eq!(report.failures.len(), 1);

        let failure = &report.failures[0];
        assert_eq!(&*failure.listener_id, "L5");
        assert_eq!(failure.event_type, WatchdogEventType::NewElement);
        assert_eq!(failure.error.as_message(), "boom");

        // still registered and still invoked for the next event
        let report = mgr.process_event(&asset_created("g2")).await.unwrap();
        assert_eq!(report.failures.len(), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    /// Collects the fields of every ERROR record as strings.
    #[derive(Clone, Default)]
    struct ErrorRecords(Arc<Mutex<Vec<HashMap<&'static str, String>>>>);

    impl<S: tracing::Subscriber> Layer<S> for ErrorRecords {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() != tracing::Level::ERROR {
                return;
            }
            let mut fields = FieldMap::default();
            event.record(&mut fields);
            self.0.lock().unwrap().push(fields.0);
        }
    }

    #[derive(Default)]
    struct FieldMap(HashMap<&'static str, String>);

    impl Visit for FieldMap {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name(), value.to_string());
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name(), format!("{value:?}"));
        }
    }

    #[tokio::test]
    async fn test_failure_emits_one_error_record() {
        let records = ErrorRecords::default();
        let _guard =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(records.clone()));

        let mgr = ListenerManager::new(ManagerConfig::for_engine("AssetQuality"));
        let (l6, _) = counting();
        mgr.register_listener("L5", failing("boom"), None, None, None).unwrap();
        mgr.register_listener("L6", l6, None, None, None).unwrap();

        let ev = asset_created("g1");
        mgr.process_event(&ev).await.unwrap();

        let records = records.0.lock().unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record["engine"], "AssetQuality");
        assert_eq!(record["listener_id"], "L5");
        assert_eq!(record["event_type"], "NEW_ELEMENT");
        assert_eq!(record["error_kind"], "runtime_error");
        assert_eq!(record["error"], "boom");
        assert_eq!(record["event"], ev.to_string());
        assert_eq!(record["message"], "watchdog listener failed to process event");
    }

    #[tokio::test]
    async fn test_panicking_listener_is_isolated() {
        let mgr = ListenerManager::default();
        let (ok, hits) = counting();
        let bad: ListenerRef =
            ListenerFn::arc(|_ev: &WatchdogEvent| -> Result<(), ListenerError> { panic!("boom") });
        mgr.register_listener("bad", bad, None, None, None).unwrap();
        mgr.register_listener("ok", ok, None, None, None).unwrap();

        let report = mgr.process_event(&asset_created("g1")).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(report.failures[0].error.as_label(), "panic");
    }

    #[tokio::test]
    async fn test_removed_listener_not_invoked() {
        let mgr = ListenerManager::default();
        let (l, hits) = counting();
        mgr.register_listener("L", l, None, None, None).unwrap();
        assert!(mgr.remove("L"));
        assert!(!mgr.contains("L"));

        let report = mgr.process_event(&asset_created("g1")).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(report, DispatchReport::default());
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mgr = ListenerManager::default();
        let (l, _) = counting();
        mgr.register_listener("L", l, None, None, None).unwrap();
        assert!(!mgr.remove("nope"));
        assert_eq!(mgr.listener_ids(), vec![Arc::<str>::from("L")]);
    }

    #[test]
    fn test_empty_listener_id_rejected() {
        let mgr = ListenerManager::default();
        let (l, _) = counting();
        let err = mgr.register_listener("", l, None, None, None).unwrap_err();
        assert_eq!(err.as_label(), "invalid_configuration");
        assert!(mgr.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_event_reaches_no_listener() {
        let mgr = ListenerManager::default();
        let (l, hits) = counting();
        mgr.register_listener("L", l, None, None, None).unwrap();

        let mut ev = asset_created("g1");
        ev.event_type = None;
        let err = mgr.process_event(&ev).await.unwrap_err();
        assert!(matches!(err, WatchdogError::InvalidEvent { .. }));

        ev.event_type = Some(WatchdogEventType::UnknownEvent);
        assert!(mgr.process_event(&ev).await.is_err());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_listener_can_register_during_dispatch() {
        let mgr = Arc::new(ListenerManager::default());
        let (late, late_hits) = counting();
        let late = Mutex::new(Some(late));
        let weak = Arc::downgrade(&mgr);

        let registrar = ListenerFn::arc(move |_ev: &WatchdogEvent| {
            if let (Some(mgr), Some(l)) = (weak.upgrade(), late.lock().unwrap().take()) {
                mgr.register_listener("late", l, None, None, None)
                    .map_err(|e| ListenerError::msg(e.to_string()))?;
            }
            Ok(())
        });
        mgr.register_listener("registrar", registrar, None, None, None)
            .unwrap();

        mgr.process_event(&asset_created("g1")).await.unwrap();
        assert!(mgr.contains("late"));
        assert_eq!(late_hits.load(Ordering::SeqCst), 0);

        mgr.process_event(&asset_created("g2")).await.unwrap();
        assert_eq!(late_hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clear_removes_everything() {
        let mgr = ListenerManager::default();
        let (a, _) = counting();
        let (b, _) = counting();
        mgr.register_listener("a", a, None, None, None).unwrap();
        mgr.register_listener("b", b, None, None, None).unwrap();
        assert_eq!(mgr.len(), 2);
        mgr.clear();
        assert!(mgr.is_empty());
    }
}
