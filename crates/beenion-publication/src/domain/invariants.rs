//! Permission rules for the Publication context.

use beenion_core::invariant::{Rule, Verdict, evaluate};
use beenion_user::domain::aggregates::User;

use super::aggregates::{Publication, PublicationRole};

struct ReviewerManagement<'a> {
    actor: &'a User,
    publication: &'a Publication,
}

fn manage_reviewers_rules<'a>() -> [Rule<ReviewerManagement<'a>>; 3] {
    [
        Rule::new("actor_active", |ctx: &ReviewerManagement<'a>| {
            ctx.actor.is_active()
        }),
        Rule::new("publication_live", |ctx: &ReviewerManagement<'a>| {
            ctx.publication.is_live()
        }),
        Rule::new(
            "actor_owns_or_edits_publication",
            |ctx: &ReviewerManagement<'a>| {
                matches!(
                    ctx.publication.role_of_user(ctx.actor),
                    Some(PublicationRole::Owner | PublicationRole::Editor)
                )
            },
        ),
    ]
}

/// Checks whether `actor` may change the reviewer pool of `publication`.
#[must_use]
pub fn check_manage_reviewers(actor: &User, publication: &Publication) -> Verdict {
    evaluate(
        &manage_reviewers_rules(),
        &ReviewerManagement { actor, publication },
    )
}

/// Returns `true` if `actor` may change the reviewer pool of `publication`.
#[must_use]
pub fn can_manage_reviewers(actor: &User, publication: &Publication) -> bool {
    check_manage_reviewers(actor, publication).is_allowed()
}
