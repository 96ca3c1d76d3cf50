//! Aggregate snapshot for the Newsletter context.

use std::collections::{BTreeMap, BTreeSet};

use beenion_core::event::History;
use beenion_core::projection::Projection;
use beenion_user::domain::aggregates::User;
use uuid::Uuid;

use super::events::{NewsletterEvent, NewsletterPrivilege, NewsletterRole};

/// Which roles hold each privilege.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Privileges(BTreeMap<NewsletterPrivilege, BTreeSet<NewsletterRole>>);

impl Privileges {
    /// Returns the roles holding `privilege`.
    #[must_use]
    pub fn roles(&self, privilege: NewsletterPrivilege) -> BTreeSet<NewsletterRole> {
        self.0.get(&privilege).cloned().unwrap_or_default()
    }

    /// Returns `true` if `role` holds `privilege`.
    #[must_use]
    pub fn allows(&self, privilege: NewsletterPrivilege, role: NewsletterRole) -> bool {
        self.0
            .get(&privilege)
            .is_some_and(|roles| roles.contains(&role))
    }

    /// Replaces the roles holding `privilege`.
    pub fn set(&mut self, privilege: NewsletterPrivilege, roles: BTreeSet<NewsletterRole>) {
        self.0.insert(privilege, roles);
    }
}

impl Default for Privileges {
    /// Owners and editors create and update; only owners delete.
    fn default() -> Self {
        let owner_and_editor = BTreeSet::from([NewsletterRole::Owner, NewsletterRole::Editor]);
        Self(BTreeMap::from([
            (NewsletterPrivilege::CreateArticle, owner_and_editor.clone()),
            (NewsletterPrivilege::UpdateArticle, owner_and_editor),
            (
                NewsletterPrivilege::DeleteArticle,
                BTreeSet::from([NewsletterRole::Owner]),
            ),
        ]))
    }
}

/// Snapshot of a newsletter, rebuilt from its history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Newsletter {
    /// Aggregate identifier, absent until the newsletter is created.
    pub newsletter_id: Option<Uuid>,
    /// The owning user.
    pub owner_id: Option<Uuid>,
    /// The newsletter title.
    pub title: Option<String>,
    /// Editorial team.
    pub editors: BTreeSet<Uuid>,
    /// Privilege table.
    pub privileges: Privileges,
    /// Whether the newsletter has been deleted.
    pub deleted: bool,
}

impl Newsletter {
    /// Returns `true` once the newsletter has been created.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.newsletter_id.is_some()
    }

    /// Returns `true` if the newsletter exists and is not deleted.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.exists() && !self.deleted
    }

    /// Returns the role `user_id` holds; owner wins over editor.
    #[must_use]
    pub fn role_of(&self, user_id: Uuid) -> Option<NewsletterRole> {
        if self.owner_id == Some(user_id) {
            Some(NewsletterRole::Owner)
        } else if self.editors.contains(&user_id) {
            Some(NewsletterRole::Editor)
        } else {
            None
        }
    }

    /// Returns the role `user` holds; `None` for a user that does not exist.
    #[must_use]
    pub fn role_of_user(&self, user: &User) -> Option<NewsletterRole> {
        user.user_id.and_then(|user_id| self.role_of(user_id))
    }

    /// Returns `true` if `user` holds a role granted `privilege`.
    #[must_use]
    pub fn grants(&self, user: &User, privilege: NewsletterPrivilege) -> bool {
        self.role_of_user(user)
            .is_some_and(|role| self.privileges.allows(privilege, role))
    }
}

impl Projection for Newsletter {
    type Event = NewsletterEvent;

    fn initial() -> Self {
        Self::default()
    }

    fn apply(mut self, event: &NewsletterEvent) -> Self {
        match event {
            NewsletterEvent::NewsletterCreated(payload) => {
                self.newsletter_id = Some(payload.newsletter_id);
                self.owner_id = Some(payload.owner_id);
                self.title = Some(payload.title.clone());
            }
            NewsletterEvent::NewsletterEditorAdded(payload) => {
                self.editors.insert(payload.editor_id);
            }
            NewsletterEvent::NewsletterEditorRemoved(payload) => {
                self.editors.remove(&payload.editor_id);
            }
            NewsletterEvent::NewsletterPrivilegeUpdated(payload) => {
                self.privileges.set(payload.privilege, payload.roles.clone());
            }
            NewsletterEvent::NewsletterDeleted(_) => {
                self.deleted = true;
            }
        }
        self
    }
}

/// Projects a newsletter history into its current snapshot.
#[must_use]
pub fn project_newsletter(history: &History<NewsletterEvent>) -> Newsletter {
    Newsletter::project(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::{
        NewsletterCreated, NewsletterDeleted, NewsletterEditorAdded, NewsletterPrivilegeUpdated,
    };
    use beenion_core::event::{DomainEvent, Recorded, Timestamp};
    use proptest::prelude::*;

    fn at(millis: i64) -> Timestamp {
        Timestamp::from_millis(millis).unwrap()
    }

    fn created(newsletter_id: Uuid, owner_id: Uuid) -> NewsletterEvent {
        NewsletterEvent::NewsletterCreated(NewsletterCreated {
            newsletter_id,
            owner_id,
            title: "Weekly Buzz".to_owned(),
            timestamp: at(1),
        })
    }

    fn user(user_id: Uuid) -> User {
        User {
            user_id: Some(user_id),
            name: None,
            active: true,
        }
    }

    #[test]
    fn test_default_privileges() {
        let privileges = Privileges::default();

        assert!(privileges.allows(NewsletterPrivilege::CreateArticle, NewsletterRole::Editor));
        assert!(privileges.allows(NewsletterPrivilege::UpdateArticle, NewsletterRole::Editor));
        assert!(privileges.allows(NewsletterPrivilege::DeleteArticle, NewsletterRole::Owner));
        assert!(!privileges.allows(NewsletterPrivilege::DeleteArticle, NewsletterRole::Editor));
    }

    #[test]
    fn test_empty_history_projects_to_initial_newsletter() {
        let newsletter = project_newsletter(&History::default());

        assert_eq!(newsletter, Newsletter::initial());
        assert!(!newsletter.is_live());
        assert_eq!(newsletter.privileges, Privileges::default());
    }

    #[test]
    fn test_privilege_update_replaces_role_set() {
        let newsletter_id = Uuid::new_v4();
        let owner_id = Uuid::new_v4();
        let editor_id = Uuid::new_v4();
        let history = History::from(vec![
            created(newsletter_id, owner_id),
            NewsletterEvent::NewsletterEditorAdded(NewsletterEditorAdded {
                newsletter_id,
                editor_id,
                timestamp: at(2),
            }),
            NewsletterEvent::NewsletterPrivilegeUpdated(NewsletterPrivilegeUpdated {
                newsletter_id,
                privilege: NewsletterPrivilege::DeleteArticle,
                roles: BTreeSet::from([NewsletterRole::Editor]),
                timestamp: at(3),
            }),
        ]);

        let newsletter = project_newsletter(&history);

        assert!(newsletter.grants(&user(editor_id), NewsletterPrivilege::DeleteArticle));
        assert!(!newsletter.grants(&user(owner_id), NewsletterPrivilege::DeleteArticle));
        assert!(newsletter.grants(&user(owner_id), NewsletterPrivilege::CreateArticle));
        assert_eq!(
            newsletter.privileges.roles(NewsletterPrivilege::DeleteArticle),
            BTreeSet::from([NewsletterRole::Editor])
        );
    }

    #[test]
    fn test_deleted_newsletter_is_not_live() {
        let newsletter_id = Uuid::new_v4();
        let history = History::from(vec![
            created(newsletter_id, Uuid::new_v4()),
            NewsletterEvent::NewsletterDeleted(NewsletterDeleted {
                newsletter_id,
                timestamp: at(2),
            }),
        ]);

        assert!(!project_newsletter(&history).is_live());
    }

    proptest! {
        #[test]
        fn unrecognized_records_never_change_the_newsletter(
            before in 0_usize..3,
            event_type in "[A-Z][a-zA-Z]{3,20}",
        ) {
            let newsletter_id = Uuid::nil();
            let events = vec![
                created(newsletter_id, Uuid::from_u128(1)),
                NewsletterEvent::NewsletterEditorAdded(NewsletterEditorAdded {
                    newsletter_id,
                    editor_id: Uuid::from_u128(2),
                    timestamp: at(2),
                }),
            ];
            prop_assume!(!NewsletterEvent::EVENT_TYPES.contains(&event_type.as_str()));
            let mut records: Vec<Recorded<NewsletterEvent>> =
                events.iter().cloned().map(Recorded::Known).collect();
            records.insert(before, Recorded::Unrecognized { event_type });

            prop_assert_eq!(
                project_newsletter(&History::new(records)),
                project_newsletter(&History::from(events))
            );
        }
    }
}
