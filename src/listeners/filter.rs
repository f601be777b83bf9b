//! # Interest filter for a registered listener.
//!
//! [`InterestFilter`] decides whether an event is delivered to a listener.
//!
//! ## Evaluation order
//! ```text
//! event_types set and event type not in it ──► skip
//! specific_instance == subject guid        ──► match
//! metadata_types unset                     ──► match
//! subject type name in metadata_types      ──► match
//! any supertype name in metadata_types     ──► match
//! otherwise                                ──► skip
//! ```
//!
//! An unset (or empty) set is a wildcard.

use std::collections::HashSet;

use crate::events::{ElementHeader, WatchdogEventType};

/// Event-type, metadata-type and instance interest of one listener.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterestFilter {
    event_types: Option<HashSet<WatchdogEventType>>,
    metadata_types: Option<HashSet<String>>,
    specific_instance: Option<String>,
}

impl InterestFilter {
    /// Creates a wildcard filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts delivery to the given event types. An empty list keeps the wildcard.
    pub fn event_types(mut self, types: impl IntoIterator<Item = WatchdogEventType>) -> Self {
        let set: HashSet<_> = types.into_iter().collect();
        self.event_types = (!set.is_empty()).then_some(set);
        self
    }

    /// Restricts delivery to subjects of the given metadata types or their subtypes.
    /// An empty list keeps the wildcard.
    pub fn metadata_types(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let set: HashSet<String> = names.into_iter().map(Into::into).collect();
        self.metadata_types = (!set.is_empty()).then_some(set);
        self
    }

    /// Always delivers events about the instance with this GUID.
    pub fn specific_instance(mut self, guid: impl Into<String>) -> Self {
        self.specific_instance = Some(guid.into());
        self
    }

    /// Returns `false` when the event type is excluded by the event-type gate.
    pub fn accepts_event_type(&self, event_type: WatchdogEventType) -> bool {
        match &self.event_types {
            Some(types) => types.contains(&event_type),
            None => true,
        }
    }

    /// Instance and metadata-type predicate; first match wins.
    pub fn is_interesting(&self, guid: &str, type_name: &str, super_type_names: &[String]) -> bool {
        if self.specific_instance.as_deref() == Some(guid) {
            return true;
        }

        let Some(types) = &self.metadata_types else {
            return true;
        };

        types.contains(type_name) || super_type_names.iter().any(|s| types.contains(s))
    }

    /// Full check for a validated event: event-type gate, then [`Self::is_interesting`].
    pub fn matches(&self, event_type: WatchdogEventType, subject: &ElementHeader) -> bool {
        self.accepts_event_type(event_type)
            && self.is_interesting(&subject.guid, &subject.type_name, &subject.super_type_names)
    }

    /// `true` when no constraint is set.
    pub fn is_wildcard(&self) -> bool {
        self.event_types.is_none()
            && self.metadata_types.is_none()
            && self.specific_instance.is_none()
    }

    pub fn interesting_event_types(&self) -> Option<&HashSet<WatchdogEventType>> {
        self.event_types.as_ref()
    }

    pub fn interesting_metadata_types(&self) -> Option<&HashSet<String>> {
        self.metadata_types.as_ref()
    }

    pub fn instance(&self) -> Option<&str> {
        self.specific_instance.as_deref()
    }
}
