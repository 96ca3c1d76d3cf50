//! Commands for the Newsletter context.

use beenion_core::command::Command;
use serde::Deserialize;
use serde_json::Value;

/// Command tag for reassigning a newsletter privilege.
pub const UPDATE_NEWSLETTER_PRIVILEGE_COMMAND: &str = "newsletter.update_privilege";

/// Command to replace the roles that hold one newsletter privilege.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateNewsletterPrivilege {
    /// History of the user making the change.
    pub user_history: Value,
    /// History of the newsletter.
    pub newsletter_history: Value,
    /// Privilege tag, e.g. `"deleteArticle"`.
    pub privilege: Value,
    /// Role tags that hold the privilege afterwards.
    pub roles: Value,
    /// Event timestamp in epoch milliseconds.
    pub timestamp: Value,
}

impl Command for UpdateNewsletterPrivilege {
    fn command_type(&self) -> &'static str {
        UPDATE_NEWSLETTER_PRIVILEGE_COMMAND
    }
}
