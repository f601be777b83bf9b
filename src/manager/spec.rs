//! # Listener registration specification.
//!
//! Defines [`ListenerSpec`], the bundle stored by the [`ListenerManager`](crate::ListenerManager)
//! for one listener id: the listener handle and its [`InterestFilter`].
//!
//! A spec can be created:
//! - **Explicitly** with [`ListenerSpec::new`]
//! - **Fluently** with [`ListenerSpec::builder`], which validates that a listener was supplied
//!
//! ## Rules
//! - `listener_id` must not be empty.
//! - Registering a spec whose id is already present replaces the old spec as a whole.

use std::fmt;
use std::sync::Arc;

use crate::error::WatchdogError;
use crate::events::WatchdogEventType;
use crate::listeners::{InterestFilter, ListenerRef};

/// One listener registration.
///
/// ## Example
/// ```rust
/// use govwatch::{ListenerError, ListenerFn, ListenerSpec, WatchdogEvent};
///
/// let spec = ListenerSpec::builder("asset-watch")
///     .metadata_types(["Asset"])
///     .listener(ListenerFn::arc(|_ev: &WatchdogEvent| Ok::<_, ListenerError>(())))
///     .build()
///     .unwrap();
/// assert_eq!(spec.listener_id(), "asset-watch");
///
/// // Without a listener the builder reports the missing parameter.
/// let err = ListenerSpec::builder("asset-watch").build().unwrap_err();
/// assert_eq!(err.as_label(), "invalid_configuration");
/// ```
#[derive(Clone)]
pub struct ListenerSpec {
    listener_id: Arc<str>,
    listener: ListenerRef,
    filter: InterestFilter,
}

impl ListenerSpec {
    /// Creates a spec with explicit parameters.
    ///
    /// ### Errors
    /// [`WatchdogError::InvalidConfiguration`] naming `listener_id` when the id is empty.
    pub fn new(
        listener_id: impl Into<Arc<str>>,
        listener: ListenerRef,
        filter: InterestFilter,
    ) -> Result<Self, WatchdogError> {
        let listener_id = listener_id.into();
        if listener_id.is_empty() {
            return Err(WatchdogError::missing("listener_id"));
        }
        Ok(Self {
            listener_id,
            listener,
            filter,
        })
    }

    /// Creates a builder for constructing a spec with a fluent API.
    pub fn builder(listener_id: impl Into<Arc<str>>) -> ListenerSpecBuilder {
        ListenerSpecBuilder::new(listener_id)
    }

    /// Returns the registration key.
    pub fn listener_id(&self) -> &str {
        &self.listener_id
    }

    pub(crate) fn id_arc(&self) -> Arc<str> {
        Arc::clone(&self.listener_id)
    }

    /// Returns the listener handle.
    pub fn listener(&self) -> &ListenerRef {
        &self.listener
    }

    /// Returns the interest filter.
    pub fn filter(&self) -> &InterestFilter {
        &self.filter
    }
}

impl fmt::Debug for ListenerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSpec")
            .field("listener_id", &self.listener_id)
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ListenerSpec`].
#[derive(Clone)]
pub struct ListenerSpecBuilder {
    listener_id: Arc<str>,
    listener: Option<ListenerRef>,
    filter: InterestFilter,
}

impl ListenerSpecBuilder {
    /// Creates a new builder for the given listener id with a wildcard filter.
    pub fn new(listener_id: impl Into<Arc<str>>) -> Self {
        Self {
            listener_id: listener_id.into(),
            listener: None,
            filter: InterestFilter::new(),
        }
    }

    pub fn listener(mut self, listener: ListenerRef) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn event_types(mut self, types: impl IntoIterator<Item = WatchdogEventType>) -> Self {
        self.filter = self.filter.event_types(types);
        self
    }

    pub fn metadata_types(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.filter = self.filter.metadata_types(names);
        self
    }

    pub fn specific_instance(mut self, guid: impl Into<String>) -> Self {
        self.filter = self.filter.specific_instance(guid);
        self
    }

    /// Replaces the whole filter.
    pub fn filter(mut self, filter: InterestFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Builds the spec.
    ///
    /// ### Errors
    /// [`WatchdogError::InvalidConfiguration`] naming `listener` when no listener
    /// was supplied, or `listener_id` when the id is empty.
    pub fn build(self) -> Result<ListenerSpec, WatchdogError> {
        let listener = self
            .listener
            .ok_or_else(|| WatchdogError::missing("listener"))?;
        ListenerSpec::new(self.listener_id, listener, self.filter)
    }
}
