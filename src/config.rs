//! # Listener manager configuration.
//!
//! Provides [`ManagerConfig`], the settings a [`ListenerManager`](crate::ListenerManager)
//! is created with.
//!
//! ## Sentinel values
//! - `topic_capacity = 0` → clamped to 1 by [`OutTopic::from_config`](crate::OutTopic::from_config)

use serde::Deserialize;

/// Configuration for the listener manager.
///
/// ## Field semantics
/// - `engine_name`: context label attached to every failure log record
/// - `topic_capacity`: ring buffer size of an [`OutTopic`](crate::OutTopic) built from this config
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Name of the governance engine that owns the listeners.
    pub engine_name: String,

    /// Capacity of the out-topic broadcast channel.
    ///
    /// Consumers that fall more than `topic_capacity` events behind skip the
    /// oldest ones and log the gap.
    pub topic_capacity: usize,
}

impl ManagerConfig {
    /// Creates a config with the given engine name and default capacity.
    pub fn for_engine(engine_name: impl Into<String>) -> Self {
        Self {
            engine_name: engine_name.into(),
            ..Self::default()
        }
    }
}

impl Default for ManagerConfig {
    /// Default configuration:
    ///
    /// - `engine_name = "watchdog"`
    /// - `topic_capacity = 1024`
    fn default() -> Self {
        Self {
            engine_name: "watchdog".to_string(),
            topic_capacity: 1024,
        }
    }
}
