//! Commands for the Article context.

use beenion_core::command::Command;
use serde::Deserialize;
use serde_json::Value;

/// Command tag for creating an article.
pub const CREATE_ARTICLE_COMMAND: &str = "article.create";
/// Command tag for updating an article.
pub const UPDATE_ARTICLE_COMMAND: &str = "article.update";
/// Command tag for deleting an article.
pub const DELETE_ARTICLE_COMMAND: &str = "article.delete";

/// Command to write a new article for a newsletter.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateArticle {
    /// History of the author.
    pub user_history: Value,
    /// History of the newsletter.
    pub newsletter_history: Value,
    /// Identifier for the new article.
    pub article_id: Value,
    /// Article title.
    pub title: Value,
    /// Event timestamp in epoch milliseconds.
    pub timestamp: Value,
}

impl Command for CreateArticle {
    fn command_type(&self) -> &'static str {
        CREATE_ARTICLE_COMMAND
    }
}

/// Command to retitle an article.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateArticle {
    /// History of the editing user.
    pub user_history: Value,
    /// History of the article's newsletter.
    pub newsletter_history: Value,
    /// History of the article.
    pub article_history: Value,
    /// New title.
    pub title: Value,
    /// Event timestamp in epoch milliseconds.
    pub timestamp: Value,
}

impl Command for UpdateArticle {
    fn command_type(&self) -> &'static str {
        UPDATE_ARTICLE_COMMAND
    }
}

/// Command to delete an article.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteArticle {
    /// History of the deleting user.
    pub user_history: Value,
    /// History of the article's newsletter.
    pub newsletter_history: Value,
    /// History of the article.
    pub article_history: Value,
    /// Event timestamp in epoch milliseconds.
    pub timestamp: Value,
}

impl Command for DeleteArticle {
    fn command_type(&self) -> &'static str {
        DELETE_ARTICLE_COMMAND
    }
}
