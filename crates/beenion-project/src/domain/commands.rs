//! Commands for the Project context.

use beenion_core::command::Command;
use serde::Deserialize;
use serde_json::Value;

/// Command tag for creating a project.
pub const CREATE_PROJECT_COMMAND: &str = "project.create";
/// Command tag for inviting a reviewer.
pub const INVITE_PROJECT_REVIEWER_COMMAND: &str = "project.invite_reviewer";
/// Command tag for closing a project.
pub const CLOSE_PROJECT_COMMAND: &str = "project.close";

/// Command to submit a new project to a publication.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateProject {
    /// History of the user creating the project.
    pub owner_history: Value,
    /// History of the target publication.
    pub publication_history: Value,
    /// Identifier for the new project.
    pub project_id: Value,
    /// Project title.
    pub title: Value,
    /// Event timestamp in epoch milliseconds.
    pub timestamp: Value,
}

impl Command for CreateProject {
    fn command_type(&self) -> &'static str {
        CREATE_PROJECT_COMMAND
    }
}

/// Command to invite a reviewer to a project.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InviteProjectReviewer {
    /// History of the user being invited.
    pub reviewer_history: Value,
    /// History of the project.
    pub project_history: Value,
    /// History of the project's publication.
    pub publication_history: Value,
    /// Event timestamp in epoch milliseconds.
    pub timestamp: Value,
}

impl Command for InviteProjectReviewer {
    fn command_type(&self) -> &'static str {
        INVITE_PROJECT_REVIEWER_COMMAND
    }
}

/// Command to close a project.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CloseProject {
    /// History of the user closing the project.
    pub user_history: Value,
    /// History of the project.
    pub project_history: Value,
    /// History of the project's publication.
    pub publication_history: Value,
    /// Event timestamp in epoch milliseconds.
    pub timestamp: Value,
}

impl Command for CloseProject {
    fn command_type(&self) -> &'static str {
        CLOSE_PROJECT_COMMAND
    }
}
