//! History fixtures.

use beenion_core::event::DomainEvent;
use beenion_core::repository::{StoredEvent, to_stored_events};
use serde_json::Value;
use uuid::Uuid;

/// Encodes `events` as the raw history document a command receives.
///
/// # Panics
///
/// Panics if an event fails to serialize, which derived events never do.
#[must_use]
pub fn history<E: DomainEvent>(events: &[E]) -> Value {
    serde_json::to_value(events).expect("event serialization is infallible")
}

/// Wraps `events` as the first rows of the stream `aggregate_id`.
#[must_use]
pub fn stored_events<E: DomainEvent>(aggregate_id: Uuid, events: &[E]) -> Vec<StoredEvent> {
    to_stored_events(aggregate_id, 0, Uuid::new_v4(), events)
}
