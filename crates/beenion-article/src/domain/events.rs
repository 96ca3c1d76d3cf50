//! Domain events for the Article context.

use beenion_core::event::{AggregateKind, DomainEvent, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event type tag for `ArticleCreated`.
pub const ARTICLE_CREATED_EVENT_TYPE: &str = "ArticleCreated";
/// Event type tag for `ArticleUpdated`.
pub const ARTICLE_UPDATED_EVENT_TYPE: &str = "ArticleUpdated";
/// Event type tag for `ArticleDeleted`.
pub const ARTICLE_DELETED_EVENT_TYPE: &str = "ArticleDeleted";

/// Emitted when an article is written for a newsletter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleCreated {
    /// The article identifier.
    pub article_id: Uuid,
    /// The newsletter the article belongs to.
    pub newsletter_id: Uuid,
    /// The author.
    pub owner_id: Uuid,
    /// The article title.
    pub title: String,
    /// When the event happened.
    pub timestamp: Timestamp,
}

/// Emitted when an article is edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleUpdated {
    /// The article identifier.
    pub article_id: Uuid,
    /// The user who edited it.
    pub user_id: Uuid,
    /// The new title.
    pub title: String,
    /// When the event happened.
    pub timestamp: Timestamp,
}

/// Emitted when an article is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDeleted {
    /// The article identifier.
    pub article_id: Uuid,
    /// The user who deleted it.
    pub user_id: Uuid,
    /// When the event happened.
    pub timestamp: Timestamp,
}

/// Event family of the Article aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ArticleEvent {
    /// An article has been created.
    ArticleCreated(ArticleCreated),
    /// An article has been updated.
    ArticleUpdated(ArticleUpdated),
    /// An article has been deleted.
    ArticleDeleted(ArticleDeleted),
}

impl DomainEvent for ArticleEvent {
    const KIND: AggregateKind = AggregateKind::Article;
    const EVENT_TYPES: &'static [&'static str] = &[
        ARTICLE_CREATED_EVENT_TYPE,
        ARTICLE_UPDATED_EVENT_TYPE,
        ARTICLE_DELETED_EVENT_TYPE,
    ];

    fn event_type(&self) -> &'static str {
        match self {
            Self::ArticleCreated(_) => ARTICLE_CREATED_EVENT_TYPE,
            Self::ArticleUpdated(_) => ARTICLE_UPDATED_EVENT_TYPE,
            Self::ArticleDeleted(_) => ARTICLE_DELETED_EVENT_TYPE,
        }
    }

    fn timestamp(&self) -> Timestamp {
        match self {
            Self::ArticleCreated(payload) => payload.timestamp,
            Self::ArticleUpdated(payload) => payload.timestamp,
            Self::ArticleDeleted(payload) => payload.timestamp,
        }
    }
}
