//! Domain events for the Newsletter context.

use std::collections::BTreeSet;

use beenion_core::event::{AggregateKind, DomainEvent, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event type tag for `NewsletterCreated`.
pub const NEWSLETTER_CREATED_EVENT_TYPE: &str = "NewsletterCreated";
/// Event type tag for `NewsletterEditorAdded`.
pub const NEWSLETTER_EDITOR_ADDED_EVENT_TYPE: &str = "NewsletterEditorAdded";
/// Event type tag for `NewsletterEditorRemoved`.
pub const NEWSLETTER_EDITOR_REMOVED_EVENT_TYPE: &str = "NewsletterEditorRemoved";
/// Event type tag for `NewsletterPrivilegeUpdated`.
pub const NEWSLETTER_PRIVILEGE_UPDATED_EVENT_TYPE: &str = "NewsletterPrivilegeUpdated";
/// Event type tag for `NewsletterDeleted`.
pub const NEWSLETTER_DELETED_EVENT_TYPE: &str = "NewsletterDeleted";

/// A role a user can hold in a newsletter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NewsletterRole {
    /// Owns the newsletter.
    Owner,
    /// Edits the newsletter.
    Editor,
}

impl NewsletterRole {
    /// Every role.
    pub const ALL: [Self; 2] = [Self::Owner, Self::Editor];

    /// Returns the wire tag of this role, as serialized by serde.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Editor => "editor",
        }
    }
}

/// An article operation that can be granted to newsletter roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NewsletterPrivilege {
    /// Create articles in the newsletter.
    CreateArticle,
    /// Update articles of the newsletter.
    UpdateArticle,
    /// Delete articles of the newsletter.
    DeleteArticle,
}

impl NewsletterPrivilege {
    /// Every privilege.
    pub const ALL: [Self; 3] = [Self::CreateArticle, Self::UpdateArticle, Self::DeleteArticle];

    /// Returns the wire tag of this privilege, as serialized by serde.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateArticle => "createArticle",
            Self::UpdateArticle => "updateArticle",
            Self::DeleteArticle => "deleteArticle",
        }
    }
}

/// Emitted when a newsletter is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterCreated {
    /// The newsletter identifier.
    pub newsletter_id: Uuid,
    /// The user who owns the newsletter.
    pub owner_id: Uuid,
    /// The newsletter title.
    pub title: String,
    /// When the event happened.
    pub timestamp: Timestamp,
}

/// Emitted when a user becomes an editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterEditorAdded {
    /// The newsletter identifier.
    pub newsletter_id: Uuid,
    /// The new editor.
    pub editor_id: Uuid,
    /// When the event happened.
    pub timestamp: Timestamp,
}

/// Emitted when a user stops being an editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterEditorRemoved {
    /// The newsletter identifier.
    pub newsletter_id: Uuid,
    /// The former editor.
    pub editor_id: Uuid,
    /// When the event happened.
    pub timestamp: Timestamp,
}

/// Emitted when the roles holding a privilege change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterPrivilegeUpdated {
    /// The newsletter identifier.
    pub newsletter_id: Uuid,
    /// The privilege being changed.
    pub privilege: NewsletterPrivilege,
    /// The roles that hold the privilege from now on.
    pub roles: BTreeSet<NewsletterRole>,
    /// When the event happened.
    pub timestamp: Timestamp,
}

/// Emitted when a newsletter is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterDeleted {
    /// The newsletter identifier.
    pub newsletter_id: Uuid,
    /// When the event happened.
    pub timestamp: Timestamp,
}

/// Event family of the Newsletter aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum NewsletterEvent {
    /// A newsletter has been created.
    NewsletterCreated(NewsletterCreated),
    /// An editor has been added.
    NewsletterEditorAdded(NewsletterEditorAdded),
    /// An editor has been removed.
    NewsletterEditorRemoved(NewsletterEditorRemoved),
    /// A privilege has been reassigned.
    NewsletterPrivilegeUpdated(NewsletterPrivilegeUpdated),
    /// The newsletter has been deleted.
    NewsletterDeleted(NewsletterDeleted),
}

impl DomainEvent for NewsletterEvent {
    const KIND: AggregateKind = AggregateKind::Newsletter;
    const EVENT_TYPES: &'static [&'static str] = &[
        NEWSLETTER_CREATED_EVENT_TYPE,
        NEWSLETTER_EDITOR_ADDED_EVENT_TYPE,
        NEWSLETTER_EDITOR_REMOVED_EVENT_TYPE,
        NEWSLETTER_PRIVILEGE_UPDATED_EVENT_TYPE,
        NEWSLETTER_DELETED_EVENT_TYPE,
    ];

    fn event_type(&self) -> &'static str {
        match self {
            Self::NewsletterCreated(_) => NEWSLETTER_CREATED_EVENT_TYPE,
            Self::NewsletterEditorAdded(_) => NEWSLETTER_EDITOR_ADDED_EVENT_TYPE,
            Self::NewsletterEditorRemoved(_) => NEWSLETTER_EDITOR_REMOVED_EVENT_TYPE,
            Self::NewsletterPrivilegeUpdated(_) => NEWSLETTER_PRIVILEGE_UPDATED_EVENT_TYPE,
            Self::NewsletterDeleted(_) => NEWSLETTER_DELETED_EVENT_TYPE,
        }
    }

    fn timestamp(&self) -> Timestamp {
        match self {
            Self::NewsletterCreated(payload) => payload.timestamp,
            Self::NewsletterEditorAdded(payload) => payload.timestamp,
            Self::NewsletterEditorRemoved(payload) => payload.timestamp,
            Self::NewsletterPrivilegeUpdated(payload) => payload.timestamp,
            Self::NewsletterDeleted(payload) => payload.timestamp,
        }
    }
}
