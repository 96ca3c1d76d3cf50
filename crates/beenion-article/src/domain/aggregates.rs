//! Aggregate snapshot for the Article context.

use beenion_core::event::History;
use beenion_core::projection::Projection;
use uuid::Uuid;

use super::events::ArticleEvent;

/// Snapshot of an article, rebuilt from its history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Article {
    /// Aggregate identifier, absent until the article is created.
    pub article_id: Option<Uuid>,
    /// The newsletter the article belongs to.
    pub newsletter_id: Option<Uuid>,
    /// The author.
    pub owner_id: Option<Uuid>,
    /// Current title.
    pub title: Option<String>,
    /// Whether the article has been deleted.
    pub deleted: bool,
}

impl Article {
    /// Returns `true` once the article has been created.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.article_id.is_some()
    }

    /// Returns `true` if the article exists and is not deleted.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.exists() && !self.deleted
    }
}

impl Projection for Article {
    type Event = ArticleEvent;

    fn initial() -> Self {
        Self::default()
    }

    fn apply(self, event: &ArticleEvent) -> Self {
        match event {
            ArticleEvent::ArticleCreated(payload) => Self {
                article_id: Some(payload.article_id),
                newsletter_id: Some(payload.newsletter_id),
                owner_id: Some(payload.owner_id),
                title: Some(payload.title.clone()),
                deleted: false,
            },
            ArticleEvent::ArticleUpdated(payload) => Self {
                title: Some(payload.title.clone()),
                ..self
            },
            ArticleEvent::ArticleDeleted(_) => Self {
                deleted: true,
                ..self
            },
        }
    }
}

/// Projects an article history into its current snapshot.
#[must_use]
pub fn project_article(history: &History<ArticleEvent>) -> Article {
    Article::project(history)
}
