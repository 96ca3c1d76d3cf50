//! Pure command handlers for the Article context.

use beenion_core::command::{Command, CommandHandler};
use beenion_core::error::{DomainError, InputError};
use beenion_core::event::{AggregateKind, History, Timestamp};
use beenion_core::invariant::Verdict;
use beenion_core::validation::{validate_identifier, validate_text, validate_timestamp};
use beenion_newsletter::domain::aggregates::{Newsletter, project_newsletter};
use beenion_newsletter::domain::events::{NewsletterEvent, NewsletterPrivilege};
use beenion_newsletter::domain::privileges::check_privilege;
use beenion_newsletter::domain::validation::validate_newsletter_history;
use beenion_user::domain::aggregates::{User, project_user};
use beenion_user::domain::events::UserEvent;
use beenion_user::domain::validation::validate_user_history;
use uuid::Uuid;

use super::aggregates::{Article, project_article};
use super::commands::{CreateArticle, DeleteArticle, UpdateArticle};
use super::events::{ArticleCreated, ArticleDeleted, ArticleEvent, ArticleUpdated};
use super::invariants::{check_delete_article, check_update_article};
use super::validation::validate_article_history;

fn permission_denied(command: &impl Command, user: &User, rule: &'static str) -> DomainError {
    DomainError::PermissionDenied {
        command: command.command_type(),
        actor: user.user_id,
        rule,
    }
}

/// Validated inputs of `CreateArticle`.
#[derive(Debug)]
pub struct AuthoringInputs {
    /// The author's history.
    pub user: History<UserEvent>,
    /// The newsletter's history.
    pub newsletter: History<NewsletterEvent>,
    /// Identifier for the new article.
    pub article_id: Uuid,
    /// Trimmed title.
    pub title: String,
    /// When the article is created.
    pub timestamp: Timestamp,
}

/// Snapshots `CreateArticle` decides on.
#[derive(Debug)]
pub struct AuthoringSnapshots {
    /// The author.
    pub user: User,
    /// The newsletter.
    pub newsletter: Newsletter,
}

/// Writes a new article for a newsletter.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateArticleHandler;

impl CommandHandler for CreateArticleHandler {
    type Command = CreateArticle;
    type Inputs = AuthoringInputs;
    type Snapshots = AuthoringSnapshots;
    type Event = ArticleEvent;

    fn validate(&self, command: &CreateArticle) -> Result<AuthoringInputs, InputError> {
        Ok(AuthoringInputs {
            user: validate_user_history("user_history", &command.user_history)?,
            newsletter: validate_newsletter_history(
                "newsletter_history",
                &command.newsletter_history,
            )?,
            article_id: validate_identifier("article_id", &command.article_id)?,
            title: validate_text("title", &command.title)?,
            timestamp: validate_timestamp("timestamp", &command.timestamp)?,
        })
    }

    fn project(&self, inputs: &AuthoringInputs) -> AuthoringSnapshots {
        AuthoringSnapshots {
            user: project_user(&inputs.user),
            newsletter: project_newsletter(&inputs.newsletter),
        }
    }

    fn decide(
        &self,
        command: &CreateArticle,
        inputs: &AuthoringInputs,
        snapshots: AuthoringSnapshots,
    ) -> Result<Vec<ArticleEvent>, DomainError> {
        let AuthoringSnapshots { user, newsletter } = snapshots;

        if let Verdict::Denied { rule } =
            check_privilege(&user, &newsletter, NewsletterPrivilege::CreateArticle)
        {
            return Err(permission_denied(command, &user, rule));
        }
        let (Some(owner_id), Some(newsletter_id)) = (user.user_id, newsletter.newsletter_id)
        else {
            return Err(DomainError::AggregateNotFound(AggregateKind::Newsletter));
        };

        Ok(vec![ArticleEvent::ArticleCreated(ArticleCreated {
            article_id: inputs.article_id,
            newsletter_id,
            owner_id,
            title: inputs.title.clone(),
            timestamp: inputs.timestamp,
        })])
    }
}

/// Writes a new article for a newsletter.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` for malformed inputs and
/// `PermissionDenied` unless the user's newsletter role may create articles.
pub fn create_article(command: &CreateArticle) -> Result<Vec<ArticleEvent>, DomainError> {
    CreateArticleHandler.handle(command)
}

/// Snapshots `UpdateArticle` and `DeleteArticle` decide on.
#[derive(Debug)]
pub struct ArticleSnapshots {
    /// The acting user.
    pub user: User,
    /// The article's newsletter.
    pub newsletter: Newsletter,
    /// The article.
    pub article: Article,
}

/// Validated inputs of `UpdateArticle`.
#[derive(Debug)]
pub struct RevisionInputs {
    /// The editing user's history.
    pub user: History<UserEvent>,
    /// The newsletter's history.
    pub newsletter: History<NewsletterEvent>,
    /// The article's history.
    pub article: History<ArticleEvent>,
    /// Trimmed new title.
    pub title: String,
    /// When the article is updated.
    pub timestamp: Timestamp,
}

/// Retitles an article.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateArticleHandler;

impl CommandHandler for UpdateArticleHandler {
    type Command = UpdateArticle;
    type Inputs = RevisionInputs;
    type Snapshots = ArticleSnapshots;
    type Event = ArticleEvent;

    fn validate(&self, command: &UpdateArticle) -> Result<RevisionInputs, InputError> {
        Ok(RevisionInputs {
            user: validate_user_history("user_history", &command.user_history)?,
            newsletter: validate_newsletter_history(
                "newsletter_history",
                &command.newsletter_history,
            )?,
            article: validate_article_history("article_history", &command.article_history)?,
            title: validate_text("title", &command.title)?,
            timestamp: validate_timestamp("timestamp", &command.timestamp)?,
        })
    }

    fn project(&self, inputs: &RevisionInputs) -> ArticleSnapshots {
        ArticleSnapshots {
            user: project_user(&inputs.user),
            newsletter: project_newsletter(&inputs.newsletter),
            article: project_article(&inputs.article),
        }
    }

    fn decide(
        &self,
        command: &UpdateArticle,
        inputs: &RevisionInputs,
        snapshots: ArticleSnapshots,
    ) -> Result<Vec<ArticleEvent>, DomainError> {
        let ArticleSnapshots {
            user,
            newsletter,
            article,
        } = snapshots;

        if let Verdict::Denied { rule } = check_update_article(&user, &newsletter, &article) {
            return Err(permission_denied(command, &user, rule));
        }
        let (Some(article_id), Some(user_id), false) =
            (article.article_id, user.user_id, article.deleted)
        else {
            return Err(DomainError::AggregateNotFound(AggregateKind::Article));
        };

        Ok(vec![ArticleEvent::ArticleUpdated(ArticleUpdated {
            article_id,
            user_id,
            title: inputs.title.clone(),
            timestamp: inputs.timestamp,
        })])
    }
}

/// Retitles an article.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` for malformed inputs,
/// `PermissionDenied` unless the user owns the article or holds the update
/// privilege, and `AggregateNotFound` for a deleted article.
pub fn update_article(command: &UpdateArticle) -> Result<Vec<ArticleEvent>, DomainError> {
    UpdateArticleHandler.handle(command)
}

/// Validated inputs of `DeleteArticle`.
#[derive(Debug)]
pub struct RemovalInputs {
    /// The deleting user's history.
    pub user: History<UserEvent>,
    /// The newsletter's history.
    pub newsletter: History<NewsletterEvent>,
    /// The article's history.
    pub article: History<ArticleEvent>,
    /// When the article is deleted.
    pub timestamp: Timestamp,
}

/// Deletes an article.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteArticleHandler;

impl CommandHandler for DeleteArticleHandler {
    type Command = DeleteArticle;
    type Inputs = RemovalInputs;
    type Snapshots = ArticleSnapshots;
    type Event = ArticleEvent;

    fn validate(&self, command: &DeleteArticle) -> Result<RemovalInputs, InputError> {
        Ok(RemovalInputs {
            user: validate_user_history("user_history", &command.user_history)?,
            newsletter: validate_newsletter_history(
                "newsletter_history",
                &command.newsletter_history,
            )?,
            article: validate_article_history("article_history", &command.article_history)?,
            timestamp: validate_timestamp("timestamp", &command.timestamp)?,
        })
    }

    fn project(&self, inputs: &RemovalInputs) -> ArticleSnapshots {
        ArticleSnapshots {
            user: project_user(&inputs.user),
            newsletter: project_newsletter(&inputs.newsletter),
            article: project_article(&inputs.article),
        }
    }

    fn decide(
        &self,
        command: &DeleteArticle,
        inputs: &RemovalInputs,
        snapshots: ArticleSnapshots,
    ) -> Result<Vec<ArticleEvent>, DomainError> {
        let ArticleSnapshots {
            user,
            newsletter,
            article,
        } = snapshots;

        if let Verdict::Denied { rule } = check_delete_article(&user, &newsletter, &article) {
            return Err(permission_denied(command, &user, rule));
        }
        let (Some(article_id), Some(user_id)) = (article.article_id, user.user_id) else {
            return Err(DomainError::AggregateNotFound(AggregateKind::Article));
        };

        Ok(vec![ArticleEvent::ArticleDeleted(ArticleDeleted {
            article_id,
            user_id,
            timestamp: inputs.timestamp,
        })])
    }
}

/// Deletes an article.
///
/// An authorized delete always emits exactly one `ArticleDeleted`, even for
/// an article that is already deleted.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` for malformed inputs and
/// `PermissionDenied` unless the user owns the article or holds the delete
/// privilege. An article with no history belongs to no newsletter, so it is
/// refused by `article_in_newsletter`. No events are returned on error.
pub fn delete_article(command: &DeleteArticle) -> Result<Vec<ArticleEvent>, DomainError> {
    DeleteArticleHandler.handle(command)
}
