//! # Watchdog events describing changes to open metadata.
//!
//! The [`WatchdogEventType`] enum classifies changes across three categories:
//! - **Element events**: an element was created, updated or deleted
//! - **Classification events**: a classification was attached, updated or removed
//! - **Relationship events**: a relationship was created, updated or deleted
//!
//! The [`WatchdogEvent`] struct carries the event type, the [`ElementHeader`] of
//! the subject instance (its GUID, type name and supertype names) and an
//! [`EventBody`] with the change details.
//!
//! For relationship events the subject header describes the relationship itself.
//!
//! ## Example
//! ```rust
//! use govwatch::{ElementHeader, WatchdogEvent, WatchdogEventType};
//!
//! let ev = WatchdogEvent::element(
//!     WatchdogEventType::NewElement,
//!     ElementHeader::new("guid-1", "CSVFile").with_super_types(["DataFile", "Asset"]),
//! );
//!
//! assert_eq!(ev.event_type, Some(WatchdogEventType::NewElement));
//! assert_eq!(ev.subject.as_ref().map(|s| s.type_name.as_str()), Some("CSVFile"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::WatchdogError;

/// Classification of watchdog events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WatchdogEventType {
    // === Element events ===
    /// A new metadata element was created.
    NewElement,
    /// The properties of an element changed.
    UpdatedElementProperties,
    /// A metadata element was deleted.
    DeletedElement,

    // === Classification events ===
    /// A classification was attached to an element.
    NewClassification,
    /// The properties of an attached classification changed.
    UpdatedClassificationProperties,
    /// A classification was removed from an element.
    DeletedClassification,

    // === Relationship events ===
    /// A relationship between two elements was created.
    NewRelationship,
    /// The properties of a relationship changed.
    UpdatedRelationshipProperties,
    /// A relationship was deleted.
    DeletedRelationship,

    /// Tag not recognized when decoding. Rejected by dispatch.
    #[serde(other)]
    UnknownEvent,
}

impl WatchdogEventType {
    /// Returns the wire name of the event type.
    pub fn as_str(&self) -> &'static str {
        match self {
            WatchdogEventType::NewElement => "NEW_ELEMENT",
            WatchdogEventType::UpdatedElementProperties => "UPDATED_ELEMENT_PROPERTIES",
            WatchdogEventType::DeletedElement => "DELETED_ELEMENT",
            WatchdogEventType::NewClassification => "NEW_CLASSIFICATION",
            WatchdogEventType::UpdatedClassificationProperties => {
                "UPDATED_CLASSIFICATION_PROPERTIES"
            }
            WatchdogEventType::DeletedClassification => "DELETED_CLASSIFICATION",
            WatchdogEventType::NewRelationship => "NEW_RELATIONSHIP",
            WatchdogEventType::UpdatedRelationshipProperties => "UPDATED_RELATIONSHIP_PROPERTIES",
            WatchdogEventType::DeletedRelationship => "DELETED_RELATIONSHIP",
            WatchdogEventType::UnknownEvent => "UNKNOWN_EVENT",
        }
    }

    /// `true` for every tag except [`WatchdogEventType::UnknownEvent`].
    #[inline]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, WatchdogEventType::UnknownEvent)
    }
}

impl fmt::Display for WatchdogEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity and type of the instance an event is about.
///
/// `super_type_names` is ordered from the closest supertype outwards and is
/// matched by name; no type hierarchy is consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementHeader {
    /// Unique identifier of the instance.
    pub guid: String,
    /// Name of the instance's type.
    pub type_name: String,
    /// Names of the type's supertypes.
    #[serde(default)]
    pub super_type_names: Vec<String>,
}

impl ElementHeader {
    /// Creates a header with no supertypes.
    pub fn new(guid: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            type_name: type_name.into(),
            super_type_names: Vec::new(),
        }
    }

    /// Sets the supertype names.
    pub fn with_super_types(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.super_type_names = names.into_iter().map(Into::into).collect();
        self
    }
}

/// Change details carried by an event.
///
/// Encoded with a snake_case `kind` tag and camelCase fields, like the rest of the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum EventBody {
    /// Element created, updated or deleted.
    Element {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        properties: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        previous_properties: Option<Value>,
    },
    /// Classification attached, updated or removed on the subject element.
    Classification {
        classification_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        properties: Option<Value>,
    },
    /// Relationship created, updated or deleted; the subject is the relationship.
    Relationship {
        end1_guid: String,
        end2_guid: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        properties: Option<Value>,
    },
}

impl Default for EventBody {
    fn default() -> Self {
        EventBody::Element {
            properties: None,
            previous_properties: None,
        }
    }
}

/// A metadata change event received from the out-topic.
///
/// `event_type` and `subject` are optional at the data level so that events
/// decoded from an external stream can be represented even when incomplete;
/// [`WatchdogEvent::validate`] rejects such events before dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchdogEvent {
    /// Event classification.
    #[serde(default)]
    pub event_type: Option<WatchdogEventType>,
    /// The instance the event is about.
    #[serde(default)]
    pub subject: Option<ElementHeader>,
    /// Change details.
    #[serde(default)]
    pub body: EventBody,
}

impl WatchdogEvent {
    /// Creates an element event.
    pub fn element(event_type: WatchdogEventType, subject: ElementHeader) -> Self {
        Self {
            event_type: Some(event_type),
            subject: Some(subject),
            body: EventBody::default(),
        }
    }

    /// Creates a classification event for `subject`.
    pub fn classification(
        event_type: WatchdogEventType,
        subject: ElementHeader,
        classification_name: impl Into<String>,
    ) -> Self {
        Self {
            event_type: Some(event_type),
            subject: Some(subject),
            body: EventBody::Classification {
                classification_name: classification_name.into(),
                properties: None,
            },
        }
    }

    /// Creates a relationship event; `relationship` describes the relationship instance.
    pub fn relationship(
        event_type: WatchdogEventType,
        relationship: ElementHeader,
        end1_guid: impl Into<String>,
        end2_guid: impl Into<String>,
    ) -> Self {
        Self {
            event_type: Some(event_type),
            subject: Some(relationship),
            body: EventBody::Relationship {
                end1_guid: end1_guid.into(),
                end2_guid: end2_guid.into(),
                properties: None,
            },
        }
    }

    /// Attaches the current properties of the subject.
    pub fn with_properties(mut self, value: Value) -> Self {
        match &mut self.body {
            EventBody::Element { properties, .. }
            | EventBody::Classification { properties, .. }
            | EventBody::Relationship { properties, .. } => *properties = Some(value),
        }
        self
    }

    /// Checks that the event can be dispatched and returns its type and subject.
    ///
    /// ### Errors
    /// [`WatchdogError::InvalidEvent`] when the event type is missing or
    /// unrecognized, or when the subject header is missing.
    pub fn validate(&self) -> Result<(WatchdogEventType, &ElementHeader), WatchdogError> {
        let event_type = match self.event_type {
            Some(t) if t.is_recognized() => t,
            Some(t) => {
                return Err(WatchdogError::invalid_event(format!(
                    "unrecognized event type {t}"
                )));
            }
            None => return Err(WatchdogError::invalid_event("missing event type")),
        };
        let subject = self
            .subject
            .as_ref()
            .ok_or_else(|| WatchdogError::invalid_event("missing subject element"))?;
        Ok((event_type, subject))
    }
}

impl fmt::Display for WatchdogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let event_type = self
            .event_type
            .map(|t| t.as_str())
            .unwrap_or("<no event type>");
        match &self.subject {
            Some(s) => write!(f, "{event_type} {}:{}", s.type_name, s.guid)?,
            None => write!(f, "{event_type} <no subject>")?,
        }
        match &self.body {
            EventBody::Element { .. } => Ok(()),
            EventBody::Classification {
                classification_name,
                ..
            } => write!(f, " classification={classification_name}"),
            EventBody::Relationship {
                end1_guid,
                end2_guid,
                ..
            } => write!(f, " ends={end1_guid}->{end2_guid}"),
        }
    }
}
