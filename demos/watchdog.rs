//! # Example: watchdog
//!
//! Register watchdog listeners, feed events through the out-topic, and watch
//! failure isolation at work.
//!
//! Demonstrates how to:
//! - Build a [`ListenerManager`] and start its consumer on an [`OutTopic`].
//! - Register listeners with event-type, metadata-type and instance filters.
//! - Replace and remove listeners while events are flowing.
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► ListenerManager::new(cfg)
//!   ├─► spawn_consumer(topic.subscribe(), token)
//!   ├─► register: log (wildcard), assets (Asset + subtypes), term (one guid), flaky (always fails)
//!   ├─► topic.publish(...)  ──► consumer ──► process_event ──► matching listeners
//!   ├─► remove("flaky"), re-register "assets" for DataFile only
//!   └─► token.cancel(), join consumer
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=govwatch=debug cargo run --example watchdog
//! ```

use std::{sync::Arc, time::Duration};

use govwatch::{
    ElementHeader, ListenerError, ListenerFn, ListenerManager, ListenerSpec, LogListener,
    ManagerConfig, OutTopic, WatchdogEvent, WatchdogEventType,
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 1) Manager and out-topic
    let cfg = ManagerConfig::for_engine("AssetGovernance");
    let topic = OutTopic::from_config(&cfg);
    let mgr = Arc::new(ListenerManager::new(cfg));
    let token = CancellationToken::new();
    let consumer = Arc::clone(&mgr).spawn_consumer(topic.subscribe(), token.clone());

    // 2) Listeners
    mgr.register(ListenerSpec::builder("log").listener(Arc::new(LogListener)).build()?);

    mgr.register(
        ListenerSpec::builder("assets")
            .metadata_types(["Asset"])
            .event_types([WatchdogEventType::NewElement, WatchdogEventType::DeletedElement])
            .listener(ListenerFn::arc(|ev: &WatchdogEvent| {
                println!("[assets] {ev}");
                Ok::<_, ListenerError>(())
            }))
            .build()?,
    );

    mgr.register_listener(
        "term",
        ListenerFn::arc(|ev: &WatchdogEvent| {
            println!("[term] {ev}");
            Ok::<_, ListenerError>(())
        }),
        None,
        Some(vec!["GlossaryTerm".into()]),
        Some("term-42".into()),
    )?;

    mgr.register_listener(
        "flaky",
        ListenerFn::arc(|_ev: &WatchdogEvent| {
            Err(ListenerError::new("store_offline", "cannot reach store"))
        }),
        None,
        None,
        None,
    )?;

    // 3) Events
    let csv = ElementHeader::new("csv-1", "CSVFile")
        .with_super_types(["DataFile", "DataStore", "Asset"]);
    topic.publish(WatchdogEvent::element(WatchdogEventType::NewElement, csv.clone()));
    topic.publish(WatchdogEvent::classification(
        WatchdogEventType::NewClassification,
        ElementHeader::new("term-42", "Process"),
        "Confidentiality",
    ));
    topic.publish(WatchdogEvent::relationship(
        WatchdogEventType::NewRelationship,
        ElementHeader::new("rel-7", "DataContentForDataSet"),
        "csv-1",
        "set-3",
    ));
    tokio::time::sleep(Duration::from_millis(100)).await;

    // 4) Change interest while running
    mgr.remove("flaky");
    mgr.register(
        ListenerSpec::builder("assets")
            .metadata_types(["DataFile"])
            .listener(ListenerFn::arc(|ev: &WatchdogEvent| {
                println!("[assets v2] {ev}");
                Ok::<_, ListenerError>(())
            }))
            .build()?,
    );
    topic.publish(WatchdogEvent::element(WatchdogEventType::DeletedElement, csv));
    tokio::time::sleep(Duration::from_millis(100)).await;

    // 5) Shutdown
    token.cancel();
    consumer.await?;
    println!("[main] listeners left: {:?}", mgr.listener_ids());
    Ok(())
}
