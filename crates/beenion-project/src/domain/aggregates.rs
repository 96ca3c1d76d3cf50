//! Aggregate snapshot for the Project context.

use std::collections::BTreeSet;

use beenion_core::event::History;
use beenion_core::projection::Projection;
use uuid::Uuid;

use super::events::ProjectEvent;

/// Lifecycle stage of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStage {
    /// Accepting reviewers.
    Open,
    /// Finished; no further invitations.
    Closed,
}

/// Snapshot of a project, rebuilt from its history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Project {
    /// Aggregate identifier, absent until the project is created.
    pub project_id: Option<Uuid>,
    /// The publication the project was submitted to.
    pub publication_id: Option<Uuid>,
    /// The owning user.
    pub owner_id: Option<Uuid>,
    /// The project title.
    pub title: Option<String>,
    /// Current stage, absent until the project is created.
    pub stage: Option<ProjectStage>,
    /// Reviewers invited so far.
    pub reviewers: BTreeSet<Uuid>,
}

impl Project {
    /// Returns `true` once the project has been created.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.project_id.is_some()
    }

    /// Returns `true` while the project accepts reviewers.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.stage == Some(ProjectStage::Open)
    }

    /// Returns `true` if `user_id` owns the project.
    #[must_use]
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == Some(user_id)
    }

    /// Returns `true` if `reviewer_id` has been invited.
    #[must_use]
    pub fn has_reviewer(&self, reviewer_id: Uuid) -> bool {
        self.reviewers.contains(&reviewer_id)
    }
}

impl Projection for Project {
    type Event = ProjectEvent;

    fn initial() -> Self {
        Self::default()
    }

    fn apply(mut self, event: &ProjectEvent) -> Self {
        match event {
            ProjectEvent::ProjectCreated(payload) => {
                self.project_id = Some(payload.project_id);
                self.publication_id = Some(payload.publication_id);
                self.owner_id = Some(payload.owner_id);
                self.title = Some(payload.title.clone());
                self.stage = Some(ProjectStage::Open);
            }
            ProjectEvent::ProjectReviewerInvited(payload) => {
                self.reviewers.insert(payload.reviewer_id);
            }
            // Rejections are part of the record only.
            ProjectEvent::ProjectReviewerInviteFailed(_) => {}
            ProjectEvent::ProjectClosed(_) => {
                self.stage = Some(ProjectStage::Closed);
            }
        }
        self
    }
}

/// Projects a project history into its current snapshot.
#[must_use]
pub fn project_project(history: &History<ProjectEvent>) -> Project {
    Project::project(history)
}
