//! Domain events for the Project context.

use beenion_core::event::{AggregateKind, DomainEvent, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event type tag for `ProjectCreated`.
pub const PROJECT_CREATED_EVENT_TYPE: &str = "ProjectCreated";
/// Event type tag for `ProjectReviewerInvited`.
pub const PROJECT_REVIEWER_INVITED_EVENT_TYPE: &str = "ProjectReviewerInvited";
/// Event type tag for `ProjectReviewerInviteFailed`.
pub const PROJECT_REVIEWER_INVITE_FAILED_EVENT_TYPE: &str = "ProjectReviewerInviteFailed";
/// Event type tag for `ProjectClosed`.
pub const PROJECT_CLOSED_EVENT_TYPE: &str = "ProjectClosed";

/// Emitted when a project is submitted to a publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreated {
    /// The project identifier.
    pub project_id: Uuid,
    /// The publication the project belongs to.
    pub publication_id: Uuid,
    /// The user who owns the project.
    pub owner_id: Uuid,
    /// The project title.
    pub title: String,
    /// When the event happened.
    pub timestamp: Timestamp,
}

/// Emitted when a reviewer is invited to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReviewerInvited {
    /// The project identifier.
    pub project_id: Uuid,
    /// The invited reviewer.
    pub reviewer_id: Uuid,
    /// When the event happened.
    pub timestamp: Timestamp,
}

/// Emitted when an invitation is rejected by the project's rules.
///
/// Carries the same fields as [`ProjectReviewerInvited`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReviewerInviteFailed {
    /// The project identifier.
    pub project_id: Uuid,
    /// The reviewer that could not be invited.
    pub reviewer_id: Uuid,
    /// When the event happened.
    pub timestamp: Timestamp,
}

/// Emitted when a project is closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectClosed {
    /// The project identifier.
    pub project_id: Uuid,
    /// The user who closed it.
    pub user_id: Uuid,
    /// When the event happened.
    pub timestamp: Timestamp,
}

/// Event family of the Project aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ProjectEvent {
    /// A project has been created.
    ProjectCreated(ProjectCreated),
    /// A reviewer has been invited.
    ProjectReviewerInvited(ProjectReviewerInvited),
    /// An invitation was rejected.
    ProjectReviewerInviteFailed(ProjectReviewerInviteFailed),
    /// The project has been closed.
    ProjectClosed(ProjectClosed),
}

impl DomainEvent for ProjectEvent {
    const KIND: AggregateKind = AggregateKind::Project;
    const EVENT_TYPES: &'static [&'static str] = &[
        PROJECT_CREATED_EVENT_TYPE,
        PROJECT_REVIEWER_INVITED_EVENT_TYPE,
        PROJECT_REVIEWER_INVITE_FAILED_EVENT_TYPE,
        PROJECT_CLOSED_EVENT_TYPE,
    ];

    fn event_type(&self) -> &'static str {
        match self {
            Self::ProjectCreated(_) => PROJECT_CREATED_EVENT_TYPE,
            Self::ProjectReviewerInvited(_) => PROJECT_REVIEWER_INVITED_EVENT_TYPE,
            Self::ProjectReviewerInviteFailed(_) => PROJECT_REVIEWER_INVITE_FAILED_EVENT_TYPE,
            Self::ProjectClosed(_) => PROJECT_CLOSED_EVENT_TYPE,
        }
    }

    fn timestamp(&self) -> Timestamp {
        match self {
            Self::ProjectCreated(payload) => payload.timestamp,
            Self::ProjectReviewerInvited(payload) => payload.timestamp,
            Self::ProjectReviewerInviteFailed(payload) => payload.timestamp,
            Self::ProjectClosed(payload) => payload.timestamp,
        }
    }
}
