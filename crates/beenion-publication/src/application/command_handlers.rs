//! Command handlers for the Publication context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: load histories, run the pure handler, persist
//! events.

use beenion_core::clock::Clock;
use beenion_core::error::DomainError;
use beenion_core::repository::{
    EventRepository, StoredEvent, history_document, stream_version, to_stored_events,
};
use serde_json::Value;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::commands::{ADD_PUBLICATION_REVIEWER_COMMAND, AddPublicationReviewer};
use crate::domain::handlers::add_publication_reviewer;

/// Request to add a reviewer to a publication's pool.
#[derive(Debug, Clone)]
pub struct AddReviewerRequest {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user performing the change.
    pub actor_id: Uuid,
    /// The user joining the pool.
    pub reviewer_id: Uuid,
    /// The publication whose pool changes.
    pub publication_id: Uuid,
}

/// Handles `AddPublicationReviewer`: loads the actor, reviewer and
/// publication streams, decides, and appends to the publication stream.
///
/// # Errors
///
/// Returns `DomainError` if loading fails, the command is refused, or the
/// append conflicts.
#[instrument(
    skip(request, clock, repo),
    fields(
        command = ADD_PUBLICATION_REVIEWER_COMMAND,
        publication_id = %request.publication_id,
        correlation_id = %request.correlation_id,
    )
)]
pub async fn handle_add_publication_reviewer(
    request: &AddReviewerRequest,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let actor_events = repo.load_events(request.actor_id).await?;
    let reviewer_events = repo.load_events(request.reviewer_id).await?;
    let publication_events = repo.load_events(request.publication_id).await?;

    let command = AddPublicationReviewer {
        actor_history: history_document(&actor_events),
        reviewer_history: history_document(&reviewer_events),
        publication_history: history_document(&publication_events),
        timestamp: Value::from(clock.timestamp().as_millis()),
    };
    let events = add_publication_reviewer(&command)
        .inspect_err(|error| warn!(%error, "add_publication_reviewer refused"))?;

    let expected_version = stream_version(&publication_events);
    let stored_events = to_stored_events(
        request.publication_id,
        expected_version,
        request.correlation_id,
        &events,
    );
    if stored_events.is_empty() {
        info!(reviewer_id = %request.reviewer_id, "reviewer already in pool");
        return Ok(stored_events);
    }

    repo.append_events(request.publication_id, expected_version, &stored_events)
        .await?;
    info!(count = stored_events.len(), "appended publication events");

    Ok(stored_events)
}
