//! Pure command handlers for the Publication context.

use beenion_core::command::{Command, CommandHandler};
use beenion_core::error::{DomainError, InputError};
use beenion_core::event::{AggregateKind, History, Timestamp};
use beenion_core::invariant::Verdict;
use beenion_core::validation::validate_timestamp;
use beenion_user::domain::aggregates::{User, project_user};
use beenion_user::domain::events::UserEvent;
use beenion_user::domain::validation::validate_user_history;

use super::aggregates::{Publication, project_publication};
use super::commands::AddPublicationReviewer;
use super::events::{PublicationEvent, PublicationReviewerAdded};
use super::invariants::check_manage_reviewers;
use super::validation::validate_publication_history;

/// Validated inputs of `AddPublicationReviewer`.
#[derive(Debug)]
pub struct ReviewerPoolInputs {
    /// The acting user's history.
    pub actor: History<UserEvent>,
    /// The joining reviewer's history.
    pub reviewer: History<UserEvent>,
    /// The publication's history.
    pub publication: History<PublicationEvent>,
    /// When the change happens.
    pub timestamp: Timestamp,
}

/// Snapshots `AddPublicationReviewer` decides on.
#[derive(Debug)]
pub struct ReviewerPoolSnapshots {
    /// The acting user.
    pub actor: User,
    /// The joining reviewer.
    pub reviewer: User,
    /// The publication.
    pub publication: Publication,
}

/// Adds a user to a publication's reviewer pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddPublicationReviewerHandler;

impl CommandHandler for AddPublicationReviewerHandler {
    type Command = AddPublicationReviewer;
    type Inputs = ReviewerPoolInputs;
    type Snapshots = ReviewerPoolSnapshots;
    type Event = PublicationEvent;

    fn validate(&self, command: &AddPublicationReviewer) -> Result<ReviewerPoolInputs, InputError> {
        Ok(ReviewerPoolInputs {
            actor: validate_user_history("actor_history", &command.actor_history)?,
            reviewer: validate_user_history("reviewer_history", &command.reviewer_history)?,
            publication: validate_publication_history(
                "publication_history",
                &command.publication_history,
            )?,
            timestamp: validate_timestamp("timestamp", &command.timestamp)?,
        })
    }

    fn project(&self, inputs: &ReviewerPoolInputs) -> ReviewerPoolSnapshots {
        ReviewerPoolSnapshots {
            actor: project_user(&inputs.actor),
            reviewer: project_user(&inputs.reviewer),
            publication: project_publication(&inputs.publication),
        }
    }

    fn decide(
        &self,
        command: &AddPublicationReviewer,
        inputs: &ReviewerPoolInputs,
        snapshots: ReviewerPoolSnapshots,
    ) -> Result<Vec<PublicationEvent>, DomainError> {
        let ReviewerPoolSnapshots {
            actor,
            reviewer,
            publication,
        } = snapshots;

        if let Verdict::Denied { rule } = check_manage_reviewers(&actor, &publication) {
            return Err(DomainError::PermissionDenied {
                command: command.command_type(),
                actor: actor.user_id,
                rule,
            });
        }
        let Some(reviewer_id) = reviewer.user_id else {
            return Err(DomainError::AggregateNotFound(AggregateKind::User));
        };
        let Some(publication_id) = publication.publication_id else {
            return Err(DomainError::AggregateNotFound(AggregateKind::Publication));
        };
        if publication.reviewers.contains(&reviewer_id) {
            return Ok(Vec::new());
        }

        Ok(vec![PublicationEvent::PublicationReviewerAdded(
            PublicationReviewerAdded {
                publication_id,
                reviewer_id,
                timestamp: inputs.timestamp,
            },
        )])
    }
}

/// Adds a user to a publication's reviewer pool.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` for malformed inputs,
/// `PermissionDenied` unless the actor owns or edits the live publication,
/// and `AggregateNotFound` for a reviewer without history.
pub fn add_publication_reviewer(
    command: &AddPublicationReviewer,
) -> Result<Vec<PublicationEvent>, DomainError> {
    AddPublicationReviewerHandler.handle(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::{PublicationCreated, PublicationEditorAdded};
    use beenion_core::error::ShapeViolation;
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

    fn publication_events(publication_id: Uuid, owner_id: Uuid) -> Vec<PublicationEvent> {
        vec![PublicationEvent::PublicationCreated(PublicationCreated {
            publication_id,
            owner_id,
            title: "Journal of Bees".to_owned(),
            timestamp: at(2),
        })]
    }

    fn command(actor_history: Value, reviewer_history: Value, publication_history: Value) -> AddPublicationReviewer {
        AddPublicationReviewer {
            actor_history,
            reviewer_history,
            publication_history,
            timestamp: json!(1_000),
        }
    }

    #[test]
    fn test_owner_adds_reviewer_to_pool() {
        // Arrange
        let owner_id = Uuid::new_v4();
        let reviewer_id = Uuid::new_v4();
        let publication_id = Uuid::new_v4();
        let command = command(
            user_history(owner_id),
            user_history(reviewer_id),
            history(&publication_events(publication_id, owner_id)),
        );

        // Act
        let events = add_publication_reviewer(&command).unwrap();

        // Assert
        assert_eq!(
            events,
            vec![PublicationEvent::PublicationReviewerAdded(PublicationReviewerAdded {
                publication_id,
                reviewer_id,
                timestamp: at(1_000),
            })]
        );
    }

    #[test]
    fn test_editor_adds_reviewer_to_pool() {
        // Arrange
        let owner_id = Uuid::new_v4();
        let editor_id = Uuid::new_v4();
        let publication_id = Uuid::new_v4();
        let mut events = publication_events(publication_id, owner_id);
        events.push(PublicationEvent::PublicationEditorAdded(PublicationEditorAdded {
            publication_id,
            editor_id,
            timestamp: at(3),
        }));
        let command = command(
            user_history(editor_id),
            user_history(Uuid::new_v4()),
            history(&events),
        );

        // Act
        let result = add_publication_reviewer(&command);

        // Assert
        assert_eq!(result.unwrap().len(), 1);
    }

    #[test]
    fn test_outsider_is_denied() {
        // Arrange
        let outsider_id = Uuid::new_v4();
        let command = command(
            user_history(outsider_id),
            user_history(Uuid::new_v4()),
            history(&publication_events(Uuid::new_v4(), Uuid::new_v4())),
        );

        // Act
        let result = add_publication_reviewer(&command);

        // Assert
        assert_eq!(
            result,
            Err(DomainError::PermissionDenied {
                command: "publication.add_reviewer",
                actor: Some(outsider_id),
                rule: "actor_owns_or_edits_publication",
            })
        );
    }

    #[test]
    fn test_unknown_reviewer_is_not_found() {
        // Arrange
        let owner_id = Uuid::new_v4();
        let command = command(
            user_history(owner_id),
            json!([]),
            history(&publication_events(Uuid::new_v4(), owner_id)),
        );

        // Act
        let result = add_publication_reviewer(&command);

        // Assert
        assert_eq!(
            result,
            Err(DomainError::AggregateNotFound(AggregateKind::User))
        );
    }

    #[test]
    fn test_reviewer_already_in_pool_emits_nothing() {
        // Arrange
        let owner_id = Uuid::new_v4();
        let reviewer_id = Uuid::new_v4();
        let publication_id = Uuid::new_v4();
        let mut events = publication_events(publication_id, owner_id);
        events.push(PublicationEvent::PublicationReviewerAdded(PublicationReviewerAdded {
            publication_id,
            reviewer_id,
            timestamp: at(3),
        }));
        let command = command(user_history(owner_id), user_history(reviewer_id), history(&events));

        // Act
        let result = add_publication_reviewer(&command);

        // Assert
        assert_eq!(result, Ok(Vec::new()));
    }

    #[test]
    fn test_validation_follows_field_order() {
        let valid_user = user_history(Uuid::new_v4());
        let valid_publication = history(&publication_events(Uuid::new_v4(), Uuid::new_v4()));
        let invalid = json!("not a history");
        let field_of = |command: &AddPublicationReviewer| match add_publication_reviewer(command) {
            Err(DomainError::InvalidInput(InputError::InvalidHistory { field, violation, .. })) => {
                assert_eq!(violation, ShapeViolation::NotASequence);
                field
            }
            Err(DomainError::InvalidInput(InputError::InvalidTimestamp { field })) => field,
            other => panic!("expected invalid input, got {other:?}"),
        };

        let all_invalid = AddPublicationReviewer {
            timestamp: json!("yesterday"),
            ..command(invalid.clone(), invalid.clone(), invalid.clone())
        };
        assert_eq!(field_of(&all_invalid), "actor_history");

        let actor_valid = AddPublicationReviewer {
            actor_history: valid_user.clone(),
            ..all_invalid.clone()
        };
        assert_eq!(field_of(&actor_valid), "reviewer_history");

        let reviewer_valid = AddPublicationReviewer {
            reviewer_history: valid_user.clone(),
            ..actor_valid
        };
        assert_eq!(field_of(&reviewer_valid), "publication_history");

        let publication_valid = AddPublicationReviewer {
            publication_history: valid_publication,
            ..reviewer_valid
        };
        assert_eq!(field_of(&publication_valid), "timestamp");
    }
}
