//! Command handlers for the Project context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: load histories, run the pure handler, persist
//! events. Every handler appends to the project stream, rejected
//! invitations included.

use beenion_core::clock::Clock;
use beenion_core::error::DomainError;
use beenion_core::repository::{
    EventRepository, StoredEvent, history_document, stream_version, to_stored_events,
};
use serde_json::Value;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::commands::{
    CLOSE_PROJECT_COMMAND, CREATE_PROJECT_COMMAND, CloseProject, CreateProject,
    INVITE_PROJECT_REVIEWER_COMMAND, InviteProjectReviewer,
};
use crate::domain::events::ProjectEvent;
use crate::domain::handlers::{close_project, create_project, invite_project_reviewer};

/// Request to submit a project to a publication.
#[derive(Debug, Clone)]
pub struct CreateProjectRequest {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Identifier for the new project.
    pub project_id: Uuid,
    /// The user creating the project.
    pub owner_id: Uuid,
    /// The target publication.
    pub publication_id: Uuid,
    /// Project title.
    pub title: String,
}

/// Request to invite a reviewer to a project.
#[derive(Debug, Clone)]
pub struct InviteReviewerRequest {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The project.
    pub project_id: Uuid,
    /// The user being invited.
    pub reviewer_id: Uuid,
    /// The project's publication.
    pub publication_id: Uuid,
}

/// Request to close a project.
#[derive(Debug, Clone)]
pub struct CloseProjectRequest {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The project.
    pub project_id: Uuid,
    /// The user closing the project.
    pub user_id: Uuid,
    /// The project's publication.
    pub publication_id: Uuid,
}

async fn append(
    repo: &dyn EventRepository,
    project_id: Uuid,
    expected_version: i64,
    correlation_id: Uuid,
    events: &[ProjectEvent],
) -> Result<Vec<StoredEvent>, DomainError> {
    let stored_events = to_stored_events(project_id, expected_version, correlation_id, events);
    if !stored_events.is_empty() {
        repo.append_events(project_id, expected_version, &stored_events)
            .await?;
        info!(count = stored_events.len(), "appended project events");
    }
    Ok(stored_events)
}

/// Handles `CreateProject`: loads the owner and publication streams, decides,
/// and starts the project stream.
///
/// The project stream is expected to be empty; an existing stream surfaces as
/// a concurrency conflict from the repository.
///
/// # Errors
///
/// Returns `DomainError` if loading fails, the command is refused, or the
/// append conflicts.
#[instrument(
    skip(request, clock, repo),
    fields(
        command = CREATE_PROJECT_COMMAND,
        project_id = %request.project_id,
        correlation_id = %request.correlation_id,
    )
)]
pub async fn handle_create_project(
    request: &CreateProjectRequest,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let owner_events = repo.load_events(request.owner_id).await?;
    let publication_events = repo.load_events(request.publication_id).await?;

    let command = CreateProject {
        owner_history: history_document(&owner_events),
        publication_history: history_document(&publication_events),
        project_id: Value::from(request.project_id.to_string()),
        title: Value::from(request.title.as_str()),
        timestamp: Value::from(clock.timestamp().as_millis()),
    };
    let events =
        create_project(&command).inspect_err(|error| warn!(%error, "create_project refused"))?;

    append(repo, request.project_id, 0, request.correlation_id, &events).await
}

/// Handles `InviteProjectReviewer`: loads the reviewer, project and
/// publication streams, decides, and appends the outcome to the project
/// stream.
///
/// # Errors
///
/// Returns `DomainError` if loading fails, an input is invalid, the project
/// or reviewer is unknown, or the append conflicts. A rejected invitation is
/// not an error.
#[instrument(
    skip(request, clock, repo),
    fields(
        command = INVITE_PROJECT_REVIEWER_COMMAND,
        project_id = %request.project_id,
        correlation_id = %request.correlation_id,
    )
)]
pub async fn handle_invite_project_reviewer(
    request: &InviteReviewerRequest,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let reviewer_events = repo.load_events(request.reviewer_id).await?;
    let project_events = repo.load_events(request.project_id).await?;
    let publication_events = repo.load_events(request.publication_id).await?;

    let command = InviteProjectReviewer {
        reviewer_history: history_document(&reviewer_events),
        project_history: history_document(&project_events),
        publication_history: history_document(&publication_events),
        timestamp: Value::from(clock.timestamp().as_millis()),
    };
    let events = invite_project_reviewer(&command)
        .inspect_err(|error| warn!(%error, "invite_project_reviewer refused"))?;

    if events
        .iter()
        .any(|event| matches!(event, ProjectEvent::ProjectReviewerInviteFailed(_)))
    {
        info!(reviewer_id = %request.reviewer_id, "reviewer invitation rejected");
    }

    append(
        repo,
        request.project_id,
        stream_version(&project_events),
        request.correlation_id,
        &events,
    )
    .await
}

/// Handles `CloseProject`: loads the user, project and publication streams,
/// decides, and appends to the project stream.
///
/// # Errors
///
/// Returns `DomainError` if loading fails, the command is refused, or the
/// append conflicts.
#[instrument(
    skip(request, clock, repo),
    fields(
        command = CLOSE_PROJECT_COMMAND,
        project_id = %request.project_id,
        correlation_id = %request.correlation_id,
    )
)]
pub async fn handle_close_project(
    request: &CloseProjectRequest,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let user_events = repo.load_events(request.user_id).await?;
    let project_events = repo.load_events(request.project_id).await?;
    let publication_events = repo.load_events(request.publication_id).await?;

    let command = CloseProject {
        user_history: history_document(&user_events),
        project_history: history_document(&project_events),
        publication_history: history_document(&publication_events),
        timestamp: Value::from(clock.timestamp().as_millis()),
    };
    let events =
        close_project(&command).inspect_err(|error| warn!(%error, "close_project refused"))?;

    append(
        repo,
        request.project_id,
        stream_version(&project_events),
        request.correlation_id,
        &events,
    )
    .await
}
