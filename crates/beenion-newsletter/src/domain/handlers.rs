//! Pure command handlers for the Newsletter context.

use std::collections::BTreeSet;

use beenion_core::command::{Command, CommandHandler};
use beenion_core::error::{DomainError, InputError};
use beenion_core::event::{AggregateKind, History, Timestamp};
use beenion_core::invariant::Verdict;
use beenion_core::validation::validate_timestamp;
use beenion_user::domain::aggregates::{User, project_user};
use beenion_user::domain::events::UserEvent;
use beenion_user::domain::validation::validate_user_history;

use super::aggregates::{Newsletter, project_newsletter};
use super::commands::UpdateNewsletterPrivilege;
use super::events::{
    NewsletterEvent, NewsletterPrivilege, NewsletterPrivilegeUpdated, NewsletterRole,
};
use super::privileges::check_update_privileges;
use super::validation::{validate_newsletter_history, validate_privilege, validate_roles};

/// Validated inputs of `UpdateNewsletterPrivilege`.
#[derive(Debug)]
pub struct PrivilegeInputs {
    /// The acting user's history.
    pub user: History<UserEvent>,
    /// The newsletter's history.
    pub newsletter: History<NewsletterEvent>,
    /// The privilege being reassigned.
    pub privilege: NewsletterPrivilege,
    /// The roles holding it afterwards.
    pub roles: BTreeSet<NewsletterRole>,
    /// When the change happens.
    pub timestamp: Timestamp,
}

/// Snapshots `UpdateNewsletterPrivilege` decides on.
#[derive(Debug)]
pub struct PrivilegeSnapshots {
    /// The acting user.
    pub user: User,
    /// The newsletter.
    pub newsletter: Newsletter,
}

/// Reassigns a newsletter privilege.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateNewsletterPrivilegeHandler;

impl CommandHandler for UpdateNewsletterPrivilegeHandler {
    type Command = UpdateNewsletterPrivilege;
    type Inputs = PrivilegeInputs;
    type Snapshots = PrivilegeSnapshots;
    type Event = NewsletterEvent;

    fn validate(&self, command: &UpdateNewsletterPrivilege) -> Result<PrivilegeInputs, InputError> {
        Ok(PrivilegeInputs {
            user: validate_user_history("user_history", &command.user_history)?,
            newsletter: validate_newsletter_history(
                "newsletter_history",
                &command.newsletter_history,
            )?,
            privilege: validate_privilege("privilege", &command.privilege)?,
            roles: validate_roles("roles", &command.roles)?,
            timestamp: validate_timestamp("timestamp", &command.timestamp)?,
        })
    }

    fn project(&self, inputs: &PrivilegeInputs) -> PrivilegeSnapshots {
        PrivilegeSnapshots {
            user: project_user(&inputs.user),
            newsletter: project_newsletter(&inputs.newsletter),
        }
    }

    fn decide(
        &self,
        command: &UpdateNewsletterPrivilege,
        inputs: &PrivilegeInputs,
        snapshots: PrivilegeSnapshots,
    ) -> Result<Vec<NewsletterEvent>, DomainError> {
        let PrivilegeSnapshots { user, newsletter } = snapshots;

        if let Verdict::Denied { rule } = check_update_privileges(&user, &newsletter) {
            return Err(DomainError::PermissionDenied {
                command: command.command_type(),
                actor: user.user_id,
                rule,
            });
        }
        let Some(newsletter_id) = newsletter.newsletter_id else {
            return Err(DomainError::AggregateNotFound(AggregateKind::Newsletter));
        };

        Ok(vec![NewsletterEvent::NewsletterPrivilegeUpdated(
            NewsletterPrivilegeUpdated {
                newsletter_id,
                privilege: inputs.privilege,
                roles: inputs.roles.clone(),
                timestamp: inputs.timestamp,
            },
        )])
    }
}

/// Reassigns a newsletter privilege.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` for malformed inputs and
/// `PermissionDenied` unless the user owns the live newsletter.
pub fn update_newsletter_privilege(
    command: &UpdateNewsletterPrivilege,
) -> Result<Vec<NewsletterEvent>, DomainError> {
    UpdateNewsletterPrivilegeHandler.handle(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::{NewsletterCreated, NewsletterEditorAdded};
    use beenion_test_support::history;
    use beenion_user::domain::events::UserCreated;
    use serde_json::{Value, json};
    use uuid::Uuid;

    fn at(millis: i64) -> Timestamp {
        Timestamp::from_millis(millis).unwrap()
    }

    fn user_history(user_id: Uuid) -> Value {
        history(&[UserEvent::UserCreated(UserCreated {
            user_id,
            name: "Ada".to_owned(),
            timestamp: at(1),
        })])
    }

    fn newsletter_history(newsletter_id: Uuid, owner_id: Uuid, editor_id: Uuid) -> Value {
        history(&[
            NewsletterEvent::NewsletterCreated(NewsletterCreated {
                newsletter_id,
                owner_id,
                title: "Weekly Buzz".to_owned(),
                timestamp: at(1),
            }),
            NewsletterEvent::NewsletterEditorAdded(NewsletterEditorAdded {
                newsletter_id,
                editor_id,
                timestamp: at(2),
            }),
        ])
    }

    #[test]
    fn test_owner_updates_privilege() {
        // Arrange
        let newsletter_id = Uuid::new_v4();
        let owner_id = Uuid::new_v4();
        let command = UpdateNewsletterPrivilege {
            user_history: user_history(owner_id),
            newsletter_history: newsletter_history(newsletter_id, owner_id, Uuid::new_v4()),
            privilege: json!("deleteArticle"),
            roles: json!(["owner", "editor"]),
            timestamp: json!(30),
        };

        // Act
        let events = update_newsletter_privilege(&command).unwrap();

        // Assert
        assert_eq!(
            events,
            vec![NewsletterEvent::NewsletterPrivilegeUpdated(NewsletterPrivilegeUpdated {
                newsletter_id,
                privilege: NewsletterPrivilege::DeleteArticle,
                roles: BTreeSet::from([NewsletterRole::Owner, NewsletterRole::Editor]),
                timestamp: at(30),
            })]
        );
    }

    #[test]
    fn test_editor_cannot_update_privilege() {
        // Arrange
        let editor_id = Uuid::new_v4();
        let command = UpdateNewsletterPrivilege {
            user_history: user_history(editor_id),
            newsletter_history: newsletter_history(Uuid::new_v4(), Uuid::new_v4(), editor_id),
            privilege: json!("deleteArticle"),
            roles: json!(["editor"]),
            timestamp: json!(30),
        };

        // Act
        let result = update_newsletter_privilege(&command);

        // Assert
        assert_eq!(
            result,
            Err(DomainError::PermissionDenied {
                command: "newsletter.update_privilege",
                actor: Some(editor_id),
                rule: "user_owns_newsletter",
            })
        );
    }

    #[test]
    fn test_validation_follows_field_order() {
        let owner_id = Uuid::new_v4();
        let mut command = UpdateNewsletterPrivilege {
            user_history: json!({}),
            newsletter_history: json!({}),
            privilege: json!("publish"),
            roles: json!(["admin"]),
            timestamp: json!(null),
        };
        let error = |command: &UpdateNewsletterPrivilege| match update_newsletter_privilege(command) {
            Err(DomainError::InvalidInput(error)) => error,
            other => panic!("expected invalid input, got {other:?}"),
        };

        assert!(matches!(error(&command), InputError::InvalidHistory { field: "user_history", .. }));
        command.user_history = user_history(owner_id);
        assert!(matches!(
            error(&command),
            InputError::InvalidHistory { field: "newsletter_history", .. }
        ));
        command.newsletter_history = newsletter_history(Uuid::new_v4(), owner_id, Uuid::new_v4());
        assert!(matches!(error(&command), InputError::InvalidValue { field: "privilege", .. }));
        command.privilege = json!("createArticle");
        assert!(matches!(error(&command), InputError::InvalidValue { field: "roles", .. }));
        command.roles = json!(["owner"]);
        assert_eq!(error(&command), InputError::InvalidTimestamp { field: "timestamp" });
    }
}
