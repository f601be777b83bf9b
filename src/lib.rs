//! # govwatch
//!
//! **govwatch** is the watchdog listener manager of an open-metadata governance engine.
//!
//! Governance services register *watchdog listeners*, each with an interest filter
//! (event types, metadata types including supertypes, or one specific instance).
//! Metadata change events arriving from the out-topic are delivered to exactly the
//! listeners whose filter matches. A listener that fails or panics is logged and
//! skipped; it never stops delivery to the others or to later events.
//!
//! ## Architecture
//! ```text
//!   governance service start/stop              out-topic event client
//!     │  register_listener(id, l, ..)               │ publish(WatchdogEvent)
//!     │  remove(id)                                 ▼
//!     ▼                                      ┌──────────────┐
//! ┌──────────────────────────────┐           │   OutTopic   │ (broadcast)
//! │ ListenerManager              │           └──────┬───────┘
//! │  RwLock<HashMap<id, Spec>>   │◄── process_event ─┘ spawn_consumer()
//! └──────────────┬───────────────┘
//!                │ snapshot, validate once
//!      ┌─────────┼──────────┐
//!      ▼         ▼          ▼
//!   filter 1  filter 2   filter N      (event type gate, instance, metadata type)
//!      │                    │
//!   listener1.process_event  listenerN.process_event
//!                           └─► Err / panic → tracing::error!, DispatchReport.failures
//! ```
//!
//! ## Features
//! | Area          | Description                                              | Key types                                  |
//! |---------------|----------------------------------------------------------|--------------------------------------------|
//! | **Registry**  | Register, replace and remove listeners by id.            | [`ListenerManager`], [`ListenerSpec`]      |
//! | **Filtering** | Event-type, metadata-type/supertype and instance filters.| [`InterestFilter`]                         |
//! | **Listeners** | Trait, closure adapter, built-in logger.                 | [`WatchdogListener`], [`ListenerFn`], [`LogListener`] |
//! | **Events**    | Typed change events and the in-process out-topic.        | [`WatchdogEvent`], [`OutTopic`]            |
//! | **Errors**    | Caller-visible and listener-local errors.                | [`WatchdogError`], [`ListenerError`]       |
//! | **Config**    | Engine name and topic capacity.                          | [`ManagerConfig`]                          |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use govwatch::{
//!     ElementHeader, ListenerError, ListenerFn, ListenerManager, ManagerConfig, WatchdogEvent,
//!     WatchdogEventType,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mgr = ListenerManager::new(ManagerConfig::for_engine("AssetQuality"));
//!
//!     let on_asset = ListenerFn::arc(|ev: &WatchdogEvent| {
//!         println!("asset changed: {ev}");
//!         Ok::<_, ListenerError>(())
//!     });
//!     mgr.register_listener("asset-watch", on_asset, None, Some(vec!["Asset".into()]), None)?;
//!
//!     let ev = WatchdogEvent::element(
//!         WatchdogEventType::NewElement,
//!         ElementHeader::new("guid-1", "CSVFile").with_super_types(["DataFile", "Asset"]),
//!     );
//!     let report = mgr.process_event(&ev).await?;
//!     assert!(report.was_delivered("asset-watch"));
//!     Ok(())
//! }
//! ```
mod config;
mod error;
mod events;
mod listeners;
mod manager;

// ---- Public re-exports ----

pub use config::ManagerConfig;
pub use error::{ListenerError, WatchdogError};
pub use events::{ElementHeader, EventBody, OutTopic, WatchdogEvent, WatchdogEventType};
pub use listeners::{InterestFilter, ListenerFn, ListenerRef, LogListener, WatchdogListener};
pub use manager::{
    DispatchReport, ListenerFailure, ListenerManager, ListenerSpec, ListenerSpecBuilder,
};
