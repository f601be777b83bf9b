//! # Logging listener for debugging and demos.
//!
//! [`LogListener`] writes every event it receives to the `tracing` log at info level.
//! Register it with a wildcard filter to see everything arriving on the out-topic.
//!
//! ## Output fields
//! ```text
//! INFO govwatch::listeners::log: watchdog event event_type=NEW_ELEMENT type_name=Asset guid=... detail=...
//! ```

use async_trait::async_trait;

use crate::error::ListenerError;
use crate::events::{EventBody, WatchdogEvent};
use crate::listeners::listener::WatchdogListener;

/// Logs each received event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogListener;

#[async_trait]
impl WatchdogListener for LogListener {
    async fn process_event(&self, e: &WatchdogEvent) -> Result<(), ListenerError> {
        let event_type = e.event_type.map(|t| t.as_str()).unwrap_or("-");
        let (type_name, guid) = e
            .subject
            .as_ref()
            .map(|s| (s.type_name.as_str(), s.guid.as_str()))
            .unwrap_or(("-", "-"));

        match &e.body {
            EventBody::Element { .. } => {
                tracing::info!(event_type, type_name, guid, "watchdog event");
            }
            EventBody::Classification {
                classification_name,
                ..
            } => {
                tracing::info!(
                    event_type,
                    type_name,
                    guid,
                    classification = %classification_name,
                    "watchdog event"
                );
            }
            EventBody::Relationship {
                end1_guid,
                end2_guid,
                ..
            } => {
                tracing::info!(
                    event_type,
                    type_name,
                    guid,
                    end1 = %end1_guid,
                    end2 = %end2_guid,
                    "watchdog event"
                );
            }
        }
        Ok(())
    }
}
