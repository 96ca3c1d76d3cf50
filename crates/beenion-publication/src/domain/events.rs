//! Domain events for the Publication context.

use beenion_core::event::{AggregateKind, DomainEvent, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event type tag for `PublicationCreated`.
pub const PUBLICATION_CREATED_EVENT_TYPE: &str = "PublicationCreated";
/// Event type tag for `PublicationEditorAdded`.
pub const PUBLICATION_EDITOR_ADDED_EVENT_TYPE: &str = "PublicationEditorAdded";
/// Event type tag for `PublicationEditorRemoved`.
pub const PUBLICATION_EDITOR_REMOVED_EVENT_TYPE: &str = "PublicationEditorRemoved";
/// Event type tag for `PublicationReviewerAdded`.
pub const PUBLICATION_REVIEWER_ADDED_EVENT_TYPE: &str = "PublicationReviewerAdded";
/// Event type tag for `PublicationReviewerRemoved`.
pub const PUBLICATION_REVIEWER_REMOVED_EVENT_TYPE: &str = "PublicationReviewerRemoved";
/// Event type tag for `PublicationDeleted`.
pub const PUBLICATION_DELETED_EVENT_TYPE: &str = "PublicationDeleted";

/// Emitted when a publication is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationCreated {
    /// The publication identifier.
    pub publication_id: Uuid,
    /// The user who owns the publication.
    pub owner_id: Uuid,
    /// The publication title.
    pub title: String,
    /// When the event happened.
    pub timestamp: Timestamp,
}

/// Emitted when a user joins the editorial team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationEditorAdded {
    /// The publication identifier.
    pub publication_id: Uuid,
    /// The new editor.
    pub editor_id: Uuid,
    /// When the event happened.
    pub timestamp: Timestamp,
}

/// Emitted when a user leaves the editorial team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationEditorRemoved {
    /// The publication identifier.
    pub publication_id: Uuid,
    /// The former editor.
    pub editor_id: Uuid,
    /// When the event happened.
    pub timestamp: Timestamp,
}

/// Emitted when a user joins the reviewer pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationReviewerAdded {
    /// The publication identifier.
    pub publication_id: Uuid,
    /// The new reviewer.
    pub reviewer_id: Uuid,
    /// When the event happened.
    pub timestamp: Timestamp,
}

/// Emitted when a user leaves the reviewer pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationReviewerRemoved {
    /// The publication identifier.
    pub publication_id: Uuid,
    /// The former reviewer.
    pub reviewer_id: Uuid,
    /// When the event happened.
    pub timestamp: Timestamp,
}

/// Emitted when a publication is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationDeleted {
    /// The publication identifier.
    pub publication_id: Uuid,
    /// When the event happened.
    pub timestamp: Timestamp,
}

/// Event family of the Publication aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum PublicationEvent {
    /// A publication has been created.
    PublicationCreated(PublicationCreated),
    /// An editor has been added.
    PublicationEditorAdded(PublicationEditorAdded),
    /// An editor has been removed.
    PublicationEditorRemoved(PublicationEditorRemoved),
    /// A reviewer has joined the pool.
    PublicationReviewerAdded(PublicationReviewerAdded),
    /// A reviewer has left the pool.
    PublicationReviewerRemoved(PublicationReviewerRemoved),
    /// The publication has been deleted.
    PublicationDeleted(PublicationDeleted),
}

impl DomainEvent for PublicationEvent {
    const KIND: AggregateKind = AggregateKind::Publication;
    const EVENT_TYPES: &'static [&'static str] = &[
        PUBLICATION_CREATED_EVENT_TYPE,
        PUBLICATION_EDITOR_ADDED_EVENT_TYPE,
        PUBLICATION_EDITOR_REMOVED_EVENT_TYPE,
        PUBLICATION_REVIEWER_ADDED_EVENT_TYPE,
        PUBLICATION_REVIEWER_REMOVED_EVENT_TYPE,
        PUBLICATION_DELETED_EVENT_TYPE,
    ];

    fn event_type(&self) -> &'static str {
        match self {
            Self::PublicationCreated(_) => PUBLICATION_CREATED_EVENT_TYPE,
            Self::PublicationEditorAdded(_) => PUBLICATION_EDITOR_ADDED_EVENT_TYPE,
            Self::PublicationEditorRemoved(_) => PUBLICATION_EDITOR_REMOVED_EVENT_TYPE,
            Self::PublicationReviewerAdded(_) => PUBLICATION_REVIEWER_ADDED_EVENT_TYPE,
            Self::PublicationReviewerRemoved(_) => PUBLICATION_REVIEWER_REMOVED_EVENT_TYPE,
            Self::PublicationDeleted(_) => PUBLICATION_DELETED_EVENT_TYPE,
        }
    }

    fn timestamp(&self) -> Timestamp {
        match self {
            Self::PublicationCreated(payload) => payload.timestamp,
            Self::PublicationEditorAdded(payload) => payload.timestamp,
            Self::PublicationEditorRemoved(payload) => payload.timestamp,
            Self::PublicationReviewerAdded(payload) => payload.timestamp,
            Self::PublicationReviewerRemoved(payload) => payload.timestamp,
            Self::PublicationDeleted(payload) => payload.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reviewer_added_wire_shape() {
        let publication_id = Uuid::new_v4();
        let reviewer_id = Uuid::new_v4();
        let event = PublicationEvent::PublicationReviewerAdded(PublicationReviewerAdded {
            publication_id,
            reviewer_id,
            timestamp: Timestamp::from_millis(42).unwrap(),
        });

        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "type": "PublicationReviewerAdded",
                "payload": {
                    "publicationId": publication_id,
                    "reviewerId": reviewer_id,
                    "timestamp": 42
                }
            })
        );
        assert_eq!(event.event_type(), PUBLICATION_REVIEWER_ADDED_EVENT_TYPE);
    }
}
