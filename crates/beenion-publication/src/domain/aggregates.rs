//! Aggregate snapshot for the Publication context.

use std::collections::BTreeSet;

use beenion_core::event::History;
use beenion_core::projection::Projection;
use beenion_user::domain::aggregates::User;
use uuid::Uuid;

use super::events::PublicationEvent;

/// The relationship a user has with a publication, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicationRole {
    /// The user owns the publication.
    Owner,
    /// The user is on the editorial team.
    Editor,
    /// The user is in the reviewer pool.
    Reviewer,
}

/// Snapshot of a publication, rebuilt from its history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Publication {
    /// Aggregate identifier, absent until the publication is created.
    pub publication_id: Option<Uuid>,
    /// The owning user.
    pub owner_id: Option<Uuid>,
    /// The publication title.
    pub title: Option<String>,
    /// Editorial team.
    pub editors: BTreeSet<Uuid>,
    /// Reviewer pool.
    pub reviewers: BTreeSet<Uuid>,
    /// Whether the publication has been deleted.
    pub deleted: bool,
}

impl Publication {
    /// Returns `true` once the publication has been created.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.publication_id.is_some()
    }

    /// Returns `true` if the publication exists and is not deleted.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.exists() && !self.deleted
    }

    /// Returns the strongest role `user_id` holds in this publication.
    #[must_use]
    pub fn role_of(&self, user_id: Uuid) -> Option<PublicationRole> {
        if self.owner_id == Some(user_id) {
            Some(PublicationRole::Owner)
        } else if self.editors.contains(&user_id) {
            Some(PublicationRole::Editor)
        } else if self.reviewers.contains(&user_id) {
            Some(PublicationRole::Reviewer)
        } else {
            None
        }
    }

    /// Returns the strongest role `user` holds; `None` for a user that does
    /// not exist.
    #[must_use]
    pub fn role_of_user(&self, user: &User) -> Option<PublicationRole> {
        user.user_id.and_then(|user_id| self.role_of(user_id))
    }
}

impl Projection for Publication {
    type Event = PublicationEvent;

    fn initial() -> Self {
        Self::default()
    }

    fn apply(mut self, event: &PublicationEvent) -> Self {
        match event {
            PublicationEvent::PublicationCreated(payload) => {
                self.publication_id = Some(payload.publication_id);
                self.owner_id = Some(payload.owner_id);
                self.title = Some(payload.title.clone());
            }
            PublicationEvent::PublicationEditorAdded(payload) => {
                self.editors.insert(payload.editor_id);
            }
            PublicationEvent::PublicationEditorRemoved(payload) => {
                self.editors.remove(&payload.editor_id);
            }
            PublicationEvent::PublicationReviewerAdded(payload) => {
                self.reviewers.insert(payload.reviewer_id);
            }
            PublicationEvent::PublicationReviewerRemoved(payload) => {
                self.reviewers.remove(&payload.reviewer_id);
            }
            PublicationEvent::PublicationDeleted(_) => {
                self.deleted = true;
            }
        }
        self
    }
}

/// Projects a publication history into its current snapshot.
#[must_use]
pub fn project_publication(history: &History<PublicationEvent>) -> Publication {
    Publication::project(history)
}
