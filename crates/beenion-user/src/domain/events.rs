//! Domain events for the User context.

use beenion_core::event::{AggregateKind, DomainEvent, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event type tag for `UserCreated`.
pub const USER_CREATED_EVENT_TYPE: &str = "UserCreated";
/// Event type tag for `UserRenamed`.
pub const USER_RENAMED_EVENT_TYPE: &str = "UserRenamed";
/// Event type tag for `UserDeactivated`.
pub const USER_DEACTIVATED_EVENT_TYPE: &str = "UserDeactivated";

/// Emitted when a user signs up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreated {
    /// The user identifier.
    pub user_id: Uuid,
    /// The user's display name.
    pub name: String,
    /// When the event happened.
    pub timestamp: Timestamp,
}

/// Emitted when a user changes their display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRenamed {
    /// The user identifier.
    pub user_id: Uuid,
    /// The new display name.
    pub name: String,
    /// When the event happened.
    pub timestamp: Timestamp,
}

/// Emitted when a user account is deactivated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDeactivated {
    /// The user identifier.
    pub user_id: Uuid,
    /// When the event happened.
    pub timestamp: Timestamp,
}

/// Event family of the User aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum UserEvent {
    /// A user has signed up.
    UserCreated(UserCreated),
    /// A user has been renamed.
    UserRenamed(UserRenamed),
    /// A user has been deactivated.
    UserDeactivated(UserDeactivated),
}

impl DomainEvent for UserEvent {
    const KIND: AggregateKind = AggregateKind::User;
    const EVENT_TYPES: &'static [&'static str] = &[
        USER_CREATED_EVENT_TYPE,
        USER_RENAMED_EVENT_TYPE,
        USER_DEACTIVATED_EVENT_TYPE,
    ];

    fn event_type(&self) -> &'static str {
        match self {
            Self::UserCreated(_) => USER_CREATED_EVENT_TYPE,
            Self::UserRenamed(_) => USER_RENAMED_EVENT_TYPE,
            Self::UserDeactivated(_) => USER_DEACTIVATED_EVENT_TYPE,
        }
    }

    fn timestamp(&self) -> Timestamp {
        match self {
            Self::UserCreated(payload) => payload.timestamp,
            Self::UserRenamed(payload) => payload.timestamp,
            Self::UserDeactivated(payload) => payload.timestamp,
        }
    }
}
