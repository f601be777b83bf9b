//! # Watchdog listeners.
//!
//! This module provides the [`WatchdogListener`] trait, the [`InterestFilter`]
//! that decides which events a listener sees, and built-in listeners.
//!
//! ## Architecture
//! ```text
//! ListenerManager::process_event(&ev)
//!     │
//!     ├──► spec 1: InterestFilter::matches? ──► listener1.process_event(&ev)
//!     ├──► spec 2: InterestFilter::matches? ──► (skipped)
//!     └──► spec N: InterestFilter::matches? ──► listenerN.process_event(&ev)
//!                                                    └─► Err / panic → logged, dispatch continues
//! ```
//!
//! ## Listener types
//! - [`ListenerFn`] wraps a synchronous closure
//! - [`LogListener`] writes events to the log
//! - custom types implement [`WatchdogListener`] directly

mod filter;
mod listener;
mod listener_fn;
mod log;

pub use filter::InterestFilter;
pub use listener::{ListenerRef, WatchdogListener};
pub use listener_fn::ListenerFn;
pub use log::LogListener;
