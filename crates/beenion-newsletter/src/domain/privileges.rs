//! Privilege rules for the Newsletter context.
//!
//! The article context combines these with article ownership.

use beenion_core::invariant::{Rule, Verdict, evaluate};
use beenion_user::domain::aggregates::User;

use super::aggregates::Newsletter;
use super::events::{NewsletterPrivilege, NewsletterRole};

struct Grant<'a> {
    user: &'a User,
    newsletter: &'a Newsletter,
    privilege: NewsletterPrivilege,
}

fn grant_rules<'a>() -> [Rule<Grant<'a>>; 3] {
    [
        Rule::new("user_active", |ctx: &Grant<'a>| ctx.user.is_active()),
        Rule::new("newsletter_live", |ctx: &Grant<'a>| ctx.newsletter.is_live()),
        Rule::new("role_holds_privilege", |ctx: &Grant<'a>| {
            ctx.newsletter.grants(ctx.user, ctx.privilege)
        }),
    ]
}

/// Checks whether `user` holds `privilege` in `newsletter`.
#[must_use]
pub fn check_privilege(
    user: &User,
    newsletter: &Newsletter,
    privilege: NewsletterPrivilege,
) -> Verdict {
    evaluate(
        &grant_rules(),
        &Grant {
            user,
            newsletter,
            privilege,
        },
    )
}

/// Returns `true` if `user` may create articles in `newsletter`.
#[must_use]
pub fn can_create_article(user: &User, newsletter: &Newsletter) -> bool {
    check_privilege(user, newsletter, NewsletterPrivilege::CreateArticle).is_allowed()
}

/// Returns `true` if `user` may update any article of `newsletter`.
#[must_use]
pub fn can_update_article(user: &User, newsletter: &Newsletter) -> bool {
    check_privilege(user, newsletter, NewsletterPrivilege::UpdateArticle).is_allowed()
}

/// Returns `true` if `user` may delete any article of `newsletter`.
#[must_use]
pub fn can_delete_article(user: &User, newsletter: &Newsletter) -> bool {
    check_privilege(user, newsletter, NewsletterPrivilege::DeleteArticle).is_allowed()
}

struct Administration<'a> {
    user: &'a User,
    newsletter: &'a Newsletter,
}

fn administration_rules<'a>() -> [Rule<Administration<'a>>; 2] {
    [
        Rule::new("newsletter_live", |ctx: &Administration<'a>| {
            ctx.newsletter.is_live()
        }),
        Rule::new("user_owns_newsletter", |ctx: &Administration<'a>| {
            ctx.newsletter.role_of_user(ctx.user) == Some(NewsletterRole::Owner)
        }),
    ]
}

/// Checks whether `user` may reassign the privileges of `newsletter`.
#[must_use]
pub fn check_update_privileges(user: &User, newsletter: &Newsletter) -> Verdict {
    evaluate(&administration_rules(), &Administration { user, newsletter })
}

/// Returns `true` if `user` may reassign the privileges of `newsletter`.
#[must_use]
pub fn can_update_privileges(user: &User, newsletter: &Newsletter) -> bool {
    check_update_privileges(user, newsletter).is_allowed()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::domain::aggregates::Privileges;
    use uuid::Uuid;

    fn user(user_id: Uuid) -> User {
        User {
            user_id: Some(user_id),
            name: Some("Ada".to_owned()),
            active: true,
        }
    }

    fn newsletter(owner_id: Uuid, editors: &[Uuid]) -> Newsletter {
        Newsletter {
            newsletter_id: Some(Uuid::new_v4()),
            owner_id: Some(owner_id),
            title: Some("Weekly Buzz".to_owned()),
            editors: editors.iter().copied().collect(),
            privileges: Privileges::default(),
            deleted: false,
        }
    }

    #[test]
    fn test_default_privileges_for_editor() {
        let editor_id = Uuid::new_v4();
        let newsletter = newsletter(Uuid::new_v4(), &[editor_id]);
        let editor = user(editor_id);

        assert!(can_create_article(&editor, &newsletter));
        assert!(can_update_article(&editor, &newsletter));
        assert!(!can_delete_article(&editor, &newsletter));
        assert_eq!(
            check_privilege(&editor, &newsletter, NewsletterPrivilege::DeleteArticle),
            Verdict::Denied {
                rule: "role_holds_privilege"
            }
        );
    }

    #[test]
    fn test_owner_loses_revoked_privilege() {
        let owner_id = Uuid::new_v4();
        let mut newsletter = newsletter(owner_id, &[]);
        newsletter
            .privileges
            .set(NewsletterPrivilege::CreateArticle, BTreeSet::new());

        assert!(!can_create_article(&user(owner_id), &newsletter));
        assert!(can_delete_article(&user(owner_id), &newsletter));
    }

    #[test]
    fn test_inactive_user_holds_no_privilege() {
        let owner_id = Uuid::new_v4();
        let newsletter = newsletter(owner_id, &[]);
        let owner = User {
            active: false,
            ..user(owner_id)
        };

        assert_eq!(
            check_privilege(&owner, &newsletter, NewsletterPrivilege::CreateArticle).denied_rule(),
            Some("user_active")
        );
    }

    #[test]
    fn test_only_owner_updates_privileges() {
        let owner_id = Uuid::new_v4();
        let editor_id = Uuid::new_v4();
        let newsletter = newsletter(owner_id, &[editor_id]);

        assert!(can_update_privileges(&user(owner_id), &newsletter));
        assert_eq!(
            check_update_privileges(&user(editor_id), &newsletter),
            Verdict::Denied {
                rule: "user_owns_newsletter"
            }
        );
        assert_eq!(
            check_update_privileges(&user(owner_id), &Newsletter::default()).denied_rule(),
            Some("newsletter_live")
        );
    }
}
