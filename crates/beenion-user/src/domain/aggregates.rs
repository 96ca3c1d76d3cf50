//! Aggregate snapshot for the User context.

use beenion_core::event::History;
use beenion_core::projection::Projection;
use uuid::Uuid;

use super::events::UserEvent;

/// Snapshot of a user, rebuilt from the user's history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    /// Aggregate identifier, absent until the user is created.
    pub user_id: Option<Uuid>,
    /// Current display name.
    pub name: Option<String>,
    /// Whether the account can act.
    pub active: bool,
}

impl User {
    /// Returns `true` once the user has been created.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.user_id.is_some()
    }

    /// Returns `true` if the user exists and has not been deactivated.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.exists() && self.active
    }

    /// Returns `true` if this snapshot is the user `id`.
    #[must_use]
    pub fn is(&self, id: Uuid) -> bool {
        self.user_id == Some(id)
    }
}

impl Projection for User {
    type Event = UserEvent;

    fn initial() -> Self {
        Self::default()
    }

    fn apply(self, event: &UserEvent) -> Self {
        match event {
            UserEvent::UserCreated(payload) => Self {
                user_id: Some(payload.user_id),
                name: Some(payload.name.clone()),
                active: true,
            },
            UserEvent::UserRenamed(payload) => Self {
                name: Some(payload.name.clone()),
                ..self
            },
            UserEvent::UserDeactivated(_) => Self {
                active: false,
                ..self
            },
        }
    }
}

/// Projects a user history into its current snapshot.
#[must_use]
pub fn project_user(history: &History<UserEvent>) -> User {
    User::project(history)
}
