//! Commands for the Publication context.

use beenion_core::command::Command;
use serde::Deserialize;
use serde_json::Value;

/// Command tag for adding a reviewer to a publication's pool.
pub const ADD_PUBLICATION_REVIEWER_COMMAND: &str = "publication.add_reviewer";

/// Command to add a user to a publication's reviewer pool.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AddPublicationReviewer {
    /// History of the user performing the change.
    pub actor_history: Value,
    /// History of the user joining the pool.
    pub reviewer_history: Value,
    /// History of the publication.
    pub publication_history: Value,
    /// Event timestamp in epoch milliseconds.
    pub timestamp: Value,
}

impl Command for AddPublicationReviewer {
    fn command_type(&self) -> &'static str {
        ADD_PUBLICATION_REVIEWER_COMMAND
    }
}
