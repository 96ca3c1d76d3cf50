//! Event repository abstraction.
//!
//! The repository belongs to the surrounding service layer: it orders,
//! persists and hands back streams. The helpers here translate between its
//! `StoredEvent` rows and the raw history documents the kernel validates.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::error::DomainError;
use crate::event::DomainEvent;

/// Stored representation of a domain event.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEvent {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Aggregate this event belongs to.
    pub aggregate_id: Uuid,
    /// Event type name for deserialization routing.
    pub event_type: String,
    /// Serialized event payload.
    pub payload: Value,
    /// Sequence number within the aggregate stream.
    pub sequence_number: i64,
    /// Correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Causation ID linking to the causing event/command.
    pub causation_id: Uuid,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

/// Repository trait for loading and appending domain events.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Load all events for a given aggregate, ordered by sequence number.
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError>;

    /// Append new events to an aggregate stream with optimistic concurrency.
    /// `expected_version` is the last known sequence number.
    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError>;
}

/// Builds the raw history document for a loaded stream.
#[must_use]
pub fn history_document(events: &[StoredEvent]) -> Value {
    Value::Array(
        events
            .iter()
            .map(|stored| json!({ "type": stored.event_type, "payload": stored.payload }))
            .collect(),
    )
}

/// Returns the version of a loaded stream: its last sequence number, or 0.
#[must_use]
pub fn stream_version(events: &[StoredEvent]) -> i64 {
    events.last().map_or(0, |stored| stored.sequence_number)
}

/// Wraps freshly decided events for appending after `expected_version`.
///
/// Sequence numbers continue from `expected_version`; the correlation ID
/// doubles as the causation ID since commands are the only cause.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn to_stored_events<E: DomainEvent>(
    aggregate_id: Uuid,
    expected_version: i64,
    correlation_id: Uuid,
    events: &[E],
) -> Vec<StoredEvent> {
    events
        .iter()
        .enumerate()
        .map(|(offset, event)| StoredEvent {
            event_id: Uuid::new_v4(),
            aggregate_id,
            event_type: event.event_type().to_owned(),
            payload: event.to_payload(),
            sequence_number: expected_version + offset as i64 + 1,
            correlation_id,
            causation_id: correlation_id,
            occurred_at: event.timestamp().to_datetime(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(sequence_number: i64, event_type: &str) -> StoredEvent {
        StoredEvent {
            event_id: Uuid::new_v4(),
            aggregate_id: Uuid::new_v4(),
            event_type: event_type.to_owned(),
            payload: json!({ "n": sequence_number }),
            sequence_number,
            correlation_id: Uuid::new_v4(),
            causation_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
        }
    }

    #[test]
    fn test_history_document_preserves_order_and_shape() {
        let events = vec![stored(1, "First"), stored(2, "Second")];

        let document = history_document(&events);

        assert_eq!(
            document,
            json!([
                { "type": "First", "payload": { "n": 1 } },
                { "type": "Second", "payload": { "n": 2 } },
            ])
        );
    }

    #[test]
    fn test_stream_version_is_last_sequence_number() {
        assert_eq!(stream_version(&[]), 0);
        assert_eq!(stream_version(&[stored(1, "A"), stored(2, "B")]), 2);
    }
}
