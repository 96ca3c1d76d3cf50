//! Pure command handlers for the Project context.

use beenion_core::command::{Command, CommandHandler};
use beenion_core::error::{DomainError, InputError};
use beenion_core::event::{AggregateKind, History, Timestamp};
use beenion_core::invariant::Verdict;
use beenion_core::validation::{validate_identifier, validate_text, validate_timestamp};
use beenion_publication::domain::aggregates::{Publication, project_publication};
use beenion_publication::domain::events::PublicationEvent;
use beenion_publication::domain::validation::validate_publication_history;
use beenion_user::domain::aggregates::{User, project_user};
use beenion_user::domain::events::UserEvent;
use beenion_user::domain::validation::validate_user_history;
use uuid::Uuid;

use super::aggregates::{Project, project_project};
use super::commands::{CloseProject, CreateProject, InviteProjectReviewer};
use super::events::{
    ProjectClosed, ProjectCreated, ProjectEvent, ProjectReviewerInviteFailed,
    ProjectReviewerInvited,
};
use super::invariants::{can_invite_reviewer, check_close_project, check_create_project};
use super::validation::validate_project_history;

/// Validated inputs of `InviteProjectReviewer`.
#[derive(Debug)]
pub struct InvitationInputs {
    /// The invited user's history.
    pub reviewer: History<UserEvent>,
    /// The project's history.
    pub project: History<ProjectEvent>,
    /// The publication's history.
    pub publication: History<PublicationEvent>,
    /// When the invitation happens.
    pub timestamp: Timestamp,
}

/// Snapshots `InviteProjectReviewer` decides on.
#[derive(Debug)]
pub struct InvitationSnapshots {
    /// The invited user.
    pub reviewer: User,
    /// The project.
    pub project: Project,
    /// The publication.
    pub publication: Publication,
}

/// Invites a reviewer to a project.
///
/// A refused invitation is a recorded outcome: the handler emits
/// `ProjectReviewerInviteFailed` instead of returning an error.
///
/// An unknown project or reviewer is not recorded that way. A failure event
/// needs both ids, so an empty project or reviewer history is
/// `AggregateNotFound` instead, and nothing is appended.
#[derive(Debug, Clone, Copy, Default)]
pub struct InviteProjectReviewerHandler;

impl CommandHandler for InviteProjectReviewerHandler {
    type Command = InviteProjectReviewer;
    type Inputs = InvitationInputs;
    type Snapshots = InvitationSnapshots;
    type Event = ProjectEvent;

    fn validate(&self, command: &InviteProjectReviewer) -> Result<InvitationInputs, InputError> {
        Ok(InvitationInputs {
            reviewer: validate_user_history("reviewer_history", &command.reviewer_history)?,
            project: validate_project_history("project_history", &command.project_history)?,
            publication: validate_publication_history(
                "publication_history",
                &command.publication_history,
            )?,
            timestamp: validate_timestamp("timestamp", &command.timestamp)?,
        })
    }

    fn project(&self, inputs: &InvitationInputs) -> InvitationSnapshots {
        InvitationSnapshots {
            reviewer: project_user(&inputs.reviewer),
            project: project_project(&inputs.project),
            publication: project_publication(&inputs.publication),
        }
    }

    fn decide(
        &self,
        _command: &InviteProjectReviewer,
        inputs: &InvitationInputs,
        snapshots: InvitationSnapshots,
    ) -> Result<Vec<ProjectEvent>, DomainError> {
        let InvitationSnapshots {
            reviewer,
            project,
            publication,
        } = snapshots;

        let Some(project_id) = project.project_id else {
            return Err(DomainError::AggregateNotFound(AggregateKind::Project));
        };
        let Some(reviewer_id) = reviewer.user_id else {
            return Err(DomainError::AggregateNotFound(AggregateKind::User));
        };
        let timestamp = inputs.timestamp;

        if can_invite_reviewer(&reviewer, &publication, &project) {
            return Ok(vec![ProjectEvent::ProjectReviewerInvited(
                ProjectReviewerInvited {
                    project_id,
                    reviewer_id,
                    timestamp,
                },
            )]);
        }

        Ok(vec![ProjectEvent::ProjectReviewerInviteFailed(
            ProjectReviewerInviteFailed {
                project_id,
                reviewer_id,
                timestamp,
            },
        )])
    }
}

/// Invites a reviewer to a project.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` for malformed inputs and
/// `AggregateNotFound` when the project or the reviewer has no history.
pub fn invite_project_reviewer(
    command: &InviteProjectReviewer,
) -> Result<Vec<ProjectEvent>, DomainError> {
    InviteProjectReviewerHandler.handle(command)
}

/// Validated inputs of `CreateProject`.
#[derive(Debug)]
pub struct SubmissionInputs {
    /// The creating user's history.
    pub owner: History<UserEvent>,
    /// The target publication's history.
    pub publication: History<PublicationEvent>,
    /// Identifier for the new project.
    pub project_id: Uuid,
    /// Trimmed title.
    pub title: String,
    /// When the project is created.
    pub timestamp: Timestamp,
}

/// Snapshots `CreateProject` decides on.
#[derive(Debug)]
pub struct SubmissionSnapshots {
    /// The creating user.
    pub owner: User,
    /// The target publication.
    pub publication: Publication,
}

/// Submits a new project to a publication.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateProjectHandler;

impl CommandHandler for CreateProjectHandler {
    type Command = CreateProject;
    type Inputs = SubmissionInputs;
    type Snapshots = SubmissionSnapshots;
    type Event = ProjectEvent;

    fn validate(&self, command: &CreateProject) -> Result<SubmissionInputs, InputError> {
        Ok(SubmissionInputs {
            owner: validate_user_history("owner_history", &command.owner_history)?,
            publication: validate_publication_history(
                "publication_history",
                &command.publication_history,
            )?,
            project_id: validate_identifier("project_id", &command.project_id)?,
            title: validate_text("title", &command.title)?,
            timestamp: validate_timestamp("timestamp", &command.timestamp)?,
        })
    }

    fn project(&self, inputs: &SubmissionInputs) -> SubmissionSnapshots {
        SubmissionSnapshots {
            owner: project_user(&inputs.owner),
            publication: project_publication(&inputs.publication),
        }
    }

    fn decide(
        &self,
        command: &CreateProject,
        inputs: &SubmissionInputs,
        snapshots: SubmissionSnapshots,
    ) -> Result<Vec<ProjectEvent>, DomainError> {
        let SubmissionSnapshots { owner, publication } = snapshots;

        if let Verdict::Denied { rule } = check_create_project(&owner, &publication) {
            return Err(DomainError::PermissionDenied {
                command: command.command_type(),
                actor: owner.user_id,
                rule,
            });
        }
        let (Some(owner_id), Some(publication_id)) = (owner.user_id, publication.publication_id)
        else {
            return Err(DomainError::AggregateNotFound(AggregateKind::Publication));
        };

        Ok(vec![ProjectEvent::ProjectCreated(ProjectCreated {
            project_id: inputs.project_id,
            publication_id,
            owner_id,
            title: inputs.title.clone(),
            timestamp: inputs.timestamp,
        })])
    }
}

/// Submits a new project to a publication.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` for malformed inputs and
/// `PermissionDenied` unless the owner belongs to the live publication.
pub fn create_project(command: &CreateProject) -> Result<Vec<ProjectEvent>, DomainError> {
    CreateProjectHandler.handle(command)
}

/// Validated inputs of `CloseProject`.
#[derive(Debug)]
pub struct ClosingInputs {
    /// The closing user's history.
    pub user: History<UserEvent>,
    /// The project's history.
    pub project: History<ProjectEvent>,
    /// The publication's history.
    pub publication: History<PublicationEvent>,
    /// When the project closes.
    pub timestamp: Timestamp,
}

/// Snapshots `CloseProject` decides on.
#[derive(Debug)]
pub struct ClosingSnapshots {
    /// The closing user.
    pub user: User,
    /// The project.
    pub project: Project,
    /// The publication.
    pub publication: Publication,
}

/// Closes a project.
#[derive(Debug, Clone, Copy, Default)]
pub struct CloseProjectHandler;

impl CommandHandler for CloseProjectHandler {
    type Command = CloseProject;
    type Inputs = ClosingInputs;
    type Snapshots = ClosingSnapshots;
    type Event = ProjectEvent;

    fn validate(&self, command: &CloseProject) -> Result<ClosingInputs, InputError> {
        Ok(ClosingInputs {
            user: validate_user_history("user_history", &command.user_history)?,
            project: validate_project_history("project_history", &command.project_history)?,
            publication: validate_publication_history(
                "publication_history",
                &command.publication_history,
            )?,
            timestamp: validate_timestamp("timestamp", &command.timestamp)?,
        })
    }

    fn project(&self, inputs: &ClosingInputs) -> ClosingSnapshots {
        ClosingSnapshots {
            user: project_user(&inputs.user),
            project: project_project(&inputs.project),
            publication: project_publication(&inputs.publication),
        }
    }

    fn decide(
        &self,
        command: &CloseProject,
        inputs: &ClosingInputs,
        snapshots: ClosingSnapshots,
    ) -> Result<Vec<ProjectEvent>, DomainError> {
        let ClosingSnapshots {
            user,
            project,
            publication,
        } = snapshots;

        let Some(project_id) = project.project_id else {
            return Err(DomainError::AggregateNotFound(AggregateKind::Project));
        };
        if let Verdict::Denied { rule } = check_close_project(&user, &publication, &project) {
            return Err(DomainError::PermissionDenied {
                command: command.command_type(),
                actor: user.user_id,
                rule,
            });
        }
        let Some(user_id) = user.user_id else {
            return Err(DomainError::AggregateNotFound(AggregateKind::User));
        };
        if !project.is_open() {
            return Ok(Vec::new());
        }

        Ok(vec![ProjectEvent::ProjectClosed(ProjectClosed {
            project_id,
            user_id,
            timestamp: inputs.timestamp,
        })])
    }
}

/// Closes a project.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` for malformed inputs,
/// `AggregateNotFound` for a project without history, and
/// `PermissionDenied` unless the user owns the project or runs its
/// publication.
pub fn close_project(command: &CloseProject) -> Result<Vec<ProjectEvent>, DomainError> {
    CloseProjectHandler.handle(command)
}
