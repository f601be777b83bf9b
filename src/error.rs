//! Error types used by the listener manager and by watchdog listeners.
//!
//! This module defines two main error enums:
//!
//! - [`WatchdogError`] — errors reported to callers of the manager
//!   (bad registration arguments, structurally invalid events).
//! - [`ListenerError`] — errors raised by individual listeners while handling an event.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging.
//! A [`ListenerError`] never escapes [`ListenerManager::process_event`](crate::ListenerManager::process_event):
//! it is logged and recorded in the [`DispatchReport`](crate::DispatchReport) instead.

use thiserror::Error;

/// # Errors produced by the listener manager.
///
/// These are caller-visible: configuration errors surface from `register*`,
/// event errors surface from `process_event`.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WatchdogError {
    /// A registration argument was missing or invalid.
    #[error("invalid listener configuration: parameter `{parameter}` {reason}")]
    InvalidConfiguration {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The inbound event is malformed or incomplete.
    #[error("invalid watchdog event: {reason}")]
    InvalidEvent {
        /// What is wrong with the event.
        reason: String,
    },
}

impl WatchdogError {
    pub(crate) fn missing(parameter: &'static str) -> Self {
        WatchdogError::InvalidConfiguration {
            parameter,
            reason: "must be supplied".to_string(),
        }
    }

    pub(crate) fn invalid_event(reason: impl Into<String>) -> Self {
        WatchdogError::InvalidEvent {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use govwatch::WatchdogError;
    ///
    /// let err = WatchdogError::InvalidEvent { reason: "missing event type".into() };
    /// assert_eq!(err.as_label(), "invalid_event");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            WatchdogError::InvalidConfiguration { .. } => "invalid_configuration",
            WatchdogError::InvalidEvent { .. } => "invalid_event",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            WatchdogError::InvalidConfiguration { parameter, reason } => {
                format!("{parameter}: {reason}")
            }
            WatchdogError::InvalidEvent { reason } => reason.clone(),
        }
    }
}

/// # Errors raised while a listener handles an event.
///
/// `Failed` is returned by the listener itself; `Panicked` is synthesized by the
/// dispatcher when the listener's future panics.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListenerError {
    /// The listener reported a failure.
    #[error("{kind}: {message}")]
    Failed {
        /// Failure classification chosen by the listener (e.g. `"connector_error"`).
        kind: String,
        /// The underlying error message.
        message: String,
    },

    /// The listener panicked while handling the event.
    #[error("panicked: {message}")]
    Panicked {
        /// Panic payload rendered as text.
        message: String,
    },
}

impl ListenerError {
    /// Creates a `Failed` error with an explicit kind.
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        ListenerError::Failed {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Creates a `Failed` error with the generic `listener_error` kind.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new("listener_error", message)
    }

    /// Returns the failure classification.
    ///
    /// For `Failed` this is the listener-chosen kind; for panics it is `"panic"`.
    ///
    /// # Example
    /// ```
    /// use govwatch::ListenerError;
    ///
    /// assert_eq!(ListenerError::new("store_offline", "boom").as_label(), "store_offline");
    /// assert_eq!(ListenerError::Panicked { message: "boom".into() }.as_label(), "panic");
    /// ```
    pub fn as_label(&self) -> &str {
        match self {
            ListenerError::Failed { kind, .. } => kind,
            ListenerError::Panicked { .. } => "panic",
        }
    }

    /// Returns the error message without the classification prefix.
    pub fn as_message(&self) -> &str {
        match self {
            ListenerError::Failed { message, .. } => message,
            ListenerError::Panicked { message } => message,
        }
    }
}
