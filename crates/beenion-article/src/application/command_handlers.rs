//! Command handlers for the Article context.

use beenion_core::clock::Clock;
use beenion_core::error::DomainError;
use beenion_core::repository::{
    EventRepository, StoredEvent, history_document, stream_version, to_stored_events,
};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::domain::commands::{
    CREATE_ARTICLE_COMMAND, CreateArticle, DELETE_ARTICLE_COMMAND, DeleteArticle,
    UPDATE_ARTICLE_COMMAND, UpdateArticle,
};
use crate::domain::events::ArticleEvent;
use crate::domain::handlers::{create_article, delete_article, update_article};

/// Request to write a new article.
#[derive(Debug, Clone)]
pub struct CreateArticleRequest {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Identifier for the new article.
    pub article_id: Uuid,
    /// The author.
    pub user_id: Uuid,
    /// The newsletter the article is written for.
    pub newsletter_id: Uuid,
    /// Article title.
    pub title: String,
}

/// Request to retitle an article.
#[derive(Debug, Clone)]
pub struct UpdateArticleRequest {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The article.
    pub article_id: Uuid,
    /// The editing user.
    pub user_id: Uuid,
    /// The article's newsletter.
    pub newsletter_id: Uuid,
    /// New title.
    pub title: String,
}

/// Request to delete an article.
#[derive(Debug, Clone)]
pub struct DeleteArticleRequest {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The article.
    pub article_id: Uuid,
    /// The deleting user.
    pub user_id: Uuid,
    /// The article's newsletter.
    pub newsletter_id: Uuid,
}

async fn append(
    repo: &dyn EventRepository,
    article_id: Uuid,
    expected_version: i64,
    correlation_id: Uuid,
    events: &[ArticleEvent],
) -> Result<Vec<StoredEvent>, DomainError> {
    let stored_events = to_stored_events(article_id, expected_version, correlation_id, events);
    if stored_events.is_empty() {
        debug!("nothing to append");
    } else {
        repo.append_events(article_id, expected_version, &stored_events)
            .await?;
        info!(count = stored_events.len(), "appended article events");
    }
    Ok(stored_events)
}

/// Handles `CreateArticle`: loads the author and newsletter streams, decides,
/// and starts the article stream.
///
/// # Errors
///
/// Returns `DomainError` if loading fails, the command is refused, or the
/// article stream already exists.
#[instrument(
    skip(request, clock, repo),
    fields(
        command = CREATE_ARTICLE_COMMAND,
        article_id = %request.article_id,
        correlation_id = %request.correlation_id,
    )
)]
pub async fn handle_create_article(
    request: &CreateArticleRequest,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let user_events = repo.load_events(request.user_id).await?;
    let newsletter_events = repo.load_events(request.newsletter_id).await?;

    let command = CreateArticle {
        user_history: history_document(&user_events),
        newsletter_history: history_document(&newsletter_events),
        article_id: Value::from(request.article_id.to_string()),
        title: Value::from(request.title.as_str()),
        timestamp: Value::from(clock.timestamp().as_millis()),
    };
    let events =
        create_article(&command).inspect_err(|error| warn!(%error, "create_article refused"))?;

    append(repo, request.article_id, 0, request.correlation_id, &events).await
}

/// Handles `UpdateArticle`: loads the user, newsletter and article streams,
/// decides, and appends to the article stream.
///
/// # Errors
///
/// Returns `DomainError` if loading fails, the command is refused, or the
/// append conflicts.
#[instrument(
    skip(request, clock, repo),
    fields(
        command = UPDATE_ARTICLE_COMMAND,
        article_id = %request.article_id,
        correlation_id = %request.correlation_id,
    )
)]
pub async fn handle_update_article(
    request: &UpdateArticleRequest,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let user_events = repo.load_events(request.user_id).await?;
    let newsletter_events = repo.load_events(request.newsletter_id).await?;
    let article_events = repo.load_events(request.article_id).await?;

    let command = UpdateArticle {
        user_history: history_document(&user_events),
        newsletter_history: history_document(&newsletter_events),
        article_history: history_document(&article_events),
        title: Value::from(request.title.as_str()),
        timestamp: Value::from(clock.timestamp().as_millis()),
    };
    let events =
        update_article(&command).inspect_err(|error| warn!(%error, "update_article refused"))?;

    append(
        repo,
        request.article_id,
        stream_version(&article_events),
        request.correlation_id,
        &events,
    )
    .await
}

/// Handles `DeleteArticle`: loads the user, newsletter and article streams,
/// decides, and appends to the article stream.
///
/// Deleting an already deleted article appends another `ArticleDeleted`.
///
/// # Errors
///
/// Returns `DomainError` if loading fails, the command is refused, or the
/// append conflicts.
#[instrument(
    skip(request, clock, repo),
    fields(
        command = DELETE_ARTICLE_COMMAND,
        article_id = %request.article_id,
        correlation_id = %request.correlation_id,
    )
)]
pub async fn handle_delete_article(
    request: &DeleteArticleRequest,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let user_events = repo.load_events(request.user_id).await?;
    let newsletter_events = repo.load_events(request.newsletter_id).await?;
    let article_events = repo.load_events(request.article_id).await?;

    let command = DeleteArticle {
        user_history: history_document(&user_events),
        newsletter_history: history_document(&newsletter_events),
        article_history: history_document(&article_events),
        timestamp: Value::from(clock.timestamp().as_millis()),
    };
    let events =
        delete_article(&command).inspect_err(|error| warn!(%error, "delete_article refused"))?;

    append(
        repo,
        request.article_id,
        stream_version(&article_events),
        request.correlation_id,
        &events,
    )
    .await
}

#[cfg(test)]
mod tests {
    use beenion_core::event::Timestamp;
    use beenion_newsletter::domain::events::{NewsletterCreated, NewsletterEvent};
    use beenion_test_support::{
        FailingEventRepository, FixedClock, RecordingEventRepository, fixed_now, init_tracing,
        stored_events,
    };
    use beenion_user::domain::events::{UserCreated, UserEvent};
    use serde_json::json;

    use super::*;
    use crate::domain::events::{ArticleCreated, ArticleDeleted};

    struct Desk {
        owner_id: Uuid,
        newsletter_id: Uuid,
        article_id: Uuid,
    }

    impl Desk {
        fn new() -> Self {
            Self {
                owner_id: Uuid::new_v4(),
                newsletter_id: Uuid::new_v4(),
                article_id: Uuid::new_v4(),
            }
        }

        fn user(user_id: Uuid) -> Vec<StoredEvent> {
            stored_events(
                user_id,
                &[UserEvent::UserCreated(UserCreated {
                    user_id,
                    name: "Ada".to_owned(),
                    timestamp: Timestamp::from_millis(1).unwrap(),
                })],
            )
        }

        fn created(&self) -> ArticleEvent {
            ArticleEvent::ArticleCreated(ArticleCreated {
                article_id: self.article_id,
                newsletter_id: self.newsletter_id,
                owner_id: self.owner_id,
                title: "Swarm season".to_owned(),
                timestamp: Timestamp::from_millis(3).unwrap(),
            })
        }

        fn repository(&self) -> RecordingEventRepository {
            RecordingEventRepository::new()
                .with_stream(self.owner_id, Self::user(self.owner_id))
                .with_stream(
                    self.newsletter_id,
                    stored_events(
                        self.newsletter_id,
                        &[NewsletterEvent::NewsletterCreated(NewsletterCreated {
                            newsletter_id: self.newsletter_id,
                            owner_id: self.owner_id,
                            title: "Weekly Buzz".to_owned(),
                            timestamp: Timestamp::from_millis(2).unwrap(),
                        })],
                    ),
                )
        }

        fn repository_with_article(&self, events: &[ArticleEvent]) -> RecordingEventRepository {
            self.repository()
                .with_stream(self.article_id, stored_events(self.article_id, events))
        }

        fn delete_request(&self, user_id: Uuid) -> DeleteArticleRequest {
            DeleteArticleRequest {
                correlation_id: Uuid::new_v4(),
                article_id: self.article_id,
                user_id,
                newsletter_id: self.newsletter_id,
            }
        }
    }

    #[tokio::test]
    async fn test_handle_create_article_starts_article_stream() {
        // Arrange
        init_tracing();
        let desk = Desk::new();
        let repo = desk.repository();
        let request = CreateArticleRequest {
            correlation_id: Uuid::new_v4(),
            article_id: desk.article_id,
            user_id: desk.owner_id,
            newsletter_id: desk.newsletter_id,
            title: "Swarm season".to_owned(),
        };

        // Act
        let stored = handle_create_article(&request, &FixedClock(fixed_now()), &repo)
            .await
            .unwrap();

        // Assert
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].event_type, "ArticleCreated");
        assert_eq!(stored[0].aggregate_id, desk.article_id);
        assert_eq!(stored[0].sequence_number, 1);

        let appended = repo.appended_events();
        assert_eq!(appended.len(), 1);
        assert_eq!(appended[0].0, desk.article_id);
        assert_eq!(appended[0].1, 0);
    }

    #[tokio::test]
    async fn test_handle_update_article_appends_after_history() {
        // Arrange
        init_tracing();
        let desk = Desk::new();
        let repo = desk.repository_with_article(&[desk.created()]);
        let request = UpdateArticleRequest {
            correlation_id: Uuid::new_v4(),
            article_id: desk.article_id,
            user_id: desk.owner_id,
            newsletter_id: desk.newsletter_id,
            title: "Swarm season, revised".to_owned(),
        };

        // Act
        let stored = handle_update_article(&request, &FixedClock(fixed_now()), &repo)
            .await
            .unwrap();

        // Assert
        assert_eq!(stored[0].event_type, "ArticleUpdated");
        assert_eq!(stored[0].sequence_number, 2);
        assert_eq!(stored[0].payload["title"], json!("Swarm season, revised"));
        assert_eq!(repo.appended_events()[0].1, 1);
    }

    #[tokio::test]
    async fn test_handle_delete_article_appends_deletion() {
        // Arrange
        init_tracing();
        let desk = Desk::new();
        let repo = desk.repository_with_article(&[desk.created()]);

        // Act
        let stored = handle_delete_article(
            &desk.delete_request(desk.owner_id),
            &FixedClock(fixed_now()),
            &repo,
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].event_type, "ArticleDeleted");
        assert_eq!(
            stored[0].payload,
            json!({
                "articleId": desk.article_id,
                "userId": desk.owner_id,
                "timestamp": Timestamp::from(fixed_now()).as_millis()
            })
        );
    }

    #[tokio::test]
    async fn test_handle_delete_article_denied_appends_nothing() {
        // Arrange
        init_tracing();
        let desk = Desk::new();
        let stranger_id = Uuid::new_v4();
        let repo = desk
            .repository_with_article(&[desk.created()])
            .with_stream(stranger_id, Desk::user(stranger_id));

        // Act
        let result = handle_delete_article(
            &desk.delete_request(stranger_id),
            &FixedClock(fixed_now()),
            &repo,
        )
        .await;

        // Assert
        assert!(matches!(
            result,
            Err(DomainError::PermissionDenied { command: "article.delete", .. })
        ));
        assert!(repo.appended_events().is_empty());
    }

    #[tokio::test]
    async fn test_handle_delete_article_twice_appends_second_deletion() {
        // Arrange
        init_tracing();
        let desk = Desk::new();
        let deleted = ArticleEvent::ArticleDeleted(ArticleDeleted {
            article_id: desk.article_id,
            user_id: desk.owner_id,
            timestamp: Timestamp::from_millis(4).unwrap(),
        });
        let repo = desk.repository_with_article(&[desk.created(), deleted]);

        // Act
        let stored = handle_delete_article(
            &desk.delete_request(desk.owner_id),
            &FixedClock(fixed_now()),
            &repo,
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].event_type, "ArticleDeleted");
        assert_eq!(stored[0].sequence_number, 3);

        let appended = repo.appended_events();
        assert_eq!(appended.len(), 1);
        assert_eq!(appended[0].1, 2);
    }

    #[tokio::test]
    async fn test_handle_delete_article_of_missing_article_is_denied() {
        // Arrange
        init_tracing();
        let desk = Desk::new();
        let repo = desk.repository();

        // Act
        let result = handle_delete_article(
            &desk.delete_request(desk.owner_id),
            &FixedClock(fixed_now()),
            &repo,
        )
        .await;

        // Assert
        assert_eq!(
            result,
            Err(DomainError::PermissionDenied {
                command: "article.delete",
                actor: Some(desk.owner_id),
                rule: "article_in_newsletter",
            })
        );
        assert!(repo.appended_events().is_empty());
    }

    #[tokio::test]
    async fn test_handle_update_article_surfaces_repository_failure() {
        // Arrange
        init_tracing();
        let desk = Desk::new();
        let request = UpdateArticleRequest {
            correlation_id: Uuid::new_v4(),
            article_id: desk.article_id,
            user_id: desk.owner_id,
            newsletter_id: desk.newsletter_id,
            title: "Swarm season".to_owned(),
        };

        // Act
        let result =
            handle_update_article(&request, &FixedClock(fixed_now()), &FailingEventRepository)
                .await;

        // Assert
        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }
}
