//! Command handlers for the Newsletter context.

use std::collections::BTreeSet;

use beenion_core::clock::Clock;
use beenion_core::error::DomainError;
use beenion_core::repository::{
    EventRepository, StoredEvent, history_document, stream_version, to_stored_events,
};
use serde_json::Value;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::commands::{UPDATE_NEWSLETTER_PRIVILEGE_COMMAND, UpdateNewsletterPrivilege};
use crate::domain::events::{NewsletterPrivilege, NewsletterRole};
use crate::domain::handlers::update_newsletter_privilege;

/// Request to reassign a newsletter privilege.
#[derive(Debug, Clone)]
pub struct UpdatePrivilegeRequest {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The newsletter.
    pub newsletter_id: Uuid,
    /// The user making the change.
    pub user_id: Uuid,
    /// The privilege being reassigned.
    pub privilege: NewsletterPrivilege,
    /// The roles holding it afterwards.
    pub roles: BTreeSet<NewsletterRole>,
}

/// Handles `UpdateNewsletterPrivilege`: loads the user and newsletter
/// streams, decides, and appends to the newsletter stream.
///
/// # Errors
///
/// Returns `DomainError` if loading fails, the command is refused, or the
/// append conflicts.
#[instrument(
    skip(request, clock, repo),
    fields(
        command = UPDATE_NEWSLETTER_PRIVILEGE_COMMAND,
        newsletter_id = %request.newsletter_id,
        privilege = request.privilege.as_str(),
        correlation_id = %request.correlation_id,
    )
)]
pub async fn handle_update_newsletter_privilege(
    request: &UpdatePrivilegeRequest,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let user_events = repo.load_events(request.user_id).await?;
    let newsletter_events = repo.load_events(request.newsletter_id).await?;

    let command = UpdateNewsletterPrivilege {
        user_history: history_document(&user_events),
        newsletter_history: history_document(&newsletter_events),
        privilege: Value::from(request.privilege.as_str()),
        roles: request
            .roles
            .iter()
            .map(|role| Value::from(role.as_str()))
            .collect(),
        timestamp: Value::from(clock.timestamp().as_millis()),
    };
    let events = update_newsletter_privilege(&command)
        .inspect_err(|error| warn!(%error, "update_newsletter_privilege refused"))?;

    let expected_version = stream_version(&newsletter_events);
    let stored_events = to_stored_events(
        request.newsletter_id,
        expected_version,
        request.correlation_id,
        &events,
    );
    repo.append_events(request.newsletter_id, expected_version, &stored_events)
        .await?;
    info!(count = stored_events.len(), "appended newsletter events");

    Ok(stored_events)
}

#[cfg(test)]
mod tests {
    use beenion_core::event::Timestamp;
    use beenion_test_support::{
        FixedClock, RecordingEventRepository, fixed_now, init_tracing, stored_events,
    };
    use beenion_user::domain::events::{UserCreated, UserEvent};
    use serde_json::json;

    use super::*;
    use crate::domain::events::{NewsletterCreated, NewsletterEvent};

    fn seeded(owner_id: Uuid, newsletter_id: Uuid) -> RecordingEventRepository {
        RecordingEventRepository::new()
            .with_stream(
                owner_id,
                stored_events(
                    owner_id,
                    &[UserEvent::UserCreated(UserCreated {
                        user_id: owner_id,
                        name: "Ada".to_owned(),
                        timestamp: Timestamp::from_millis(1).unwrap(),
                    })],
                ),
            )
            .with_stream(
                newsletter_id,
                stored_events(
                    newsletter_id,
                    &[NewsletterEvent::NewsletterCreated(NewsletterCreated {
                        newsletter_id,
                        owner_id,
                        title: "Weekly Buzz".to_owned(),
                        timestamp: Timestamp::from_millis(2).unwrap(),
                    })],
                ),
            )
    }

    #[tokio::test]
    async fn test_handle_update_newsletter_privilege_persists_event() {
        // Arrange
        init_tracing();
        let owner_id = Uuid::new_v4();
        let newsletter_id = Uuid::new_v4();
        let repo = seeded(owner_id, newsletter_id);
        let request = UpdatePrivilegeRequest {
            correlation_id: Uuid::new_v4(),
            newsletter_id,
            user_id: owner_id,
            privilege: NewsletterPrivilege::DeleteArticle,
            roles: BTreeSet::from([NewsletterRole::Owner, NewsletterRole::Editor]),
        };

        // Act
        let result =
            handle_update_newsletter_privilege(&request, &FixedClock(fixed_now()), &repo).await;

        // Assert
        assert!(result.is_ok());

        let appended = repo.appended_events();
        assert_eq!(appended.len(), 1);

        let (agg_id, expected_version, events) = &appended[0];
        assert_eq!(*agg_id, newsletter_id);
        assert_eq!(*expected_version, 1);
        assert_eq!(events[0].event_type, "NewsletterPrivilegeUpdated");
        assert_eq!(events[0].payload["roles"], json!(["owner", "editor"]));
        assert_eq!(events[0].occurred_at, fixed_now());
    }

    #[tokio::test]
    async fn test_handle_update_newsletter_privilege_denied_for_stranger() {
        // Arrange
        init_tracing();
        let owner_id = Uuid::new_v4();
        let newsletter_id = Uuid::new_v4();
        let repo = seeded(owner_id, newsletter_id);
        let request = UpdatePrivilegeRequest {
            correlation_id: Uuid::new_v4(),
            newsletter_id,
            user_id: Uuid::new_v4(),
            privilege: NewsletterPrivilege::CreateArticle,
            roles: BTreeSet::new(),
        };

        // Act
        let result =
            handle_update_newsletter_privilege(&request, &FixedClock(fixed_now()), &repo).await;

        // Assert
        assert!(matches!(
            result,
            Err(DomainError::PermissionDenied { actor: None, .. })
        ));
        assert!(repo.appended_events().is_empty());
    }
}
