//! Listener manager: registration, dispatch and the out-topic consumer.
//!
//! The only public entry point is [`ListenerManager`]; the other types describe
//! what goes in ([`ListenerSpec`]) and what comes out ([`DispatchReport`]).
//!
//! Internal modules:
//! - [`registry`]: the listener map and `process_event`;
//! - [`dispatch`]: per-listener delivery with panic isolation;
//! - [`consumer`]: background loop feeding out-topic events to the manager;
//! - [`spec`]: registration bundle and its builder.

mod consumer;
mod dispatch;
mod registry;
mod spec;

pub use dispatch::{DispatchReport, ListenerFailure};
pub use registry::ListenerManager;
pub use spec::{ListenerSpec, ListenerSpecBuilder};
