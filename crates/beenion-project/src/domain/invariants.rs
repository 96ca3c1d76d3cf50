//! Permission rules for the Project context.
//!
//! Each `can_*` predicate has a `check_*` companion that names the first
//! rule that did not hold.

use beenion_core::invariant::{Rule, Verdict, evaluate};
use beenion_publication::domain::aggregates::{Publication, PublicationRole};
use beenion_user::domain::aggregates::User;

use super::aggregates::Project;

struct Invitation<'a> {
    reviewer: &'a User,
    publication: &'a Publication,
    project: &'a Project,
}

fn invitation_rules<'a>() -> [Rule<Invitation<'a>>; 6] {
    [
        Rule::new("reviewer_active", |ctx: &Invitation<'a>| {
            ctx.reviewer.is_active()
        }),
        Rule::new("publication_live", |ctx: &Invitation<'a>| {
            ctx.publication.is_live()
        }),
        Rule::new("project_open", |ctx: &Invitation<'a>| ctx.project.is_open()),
        Rule::new("project_in_publication", |ctx: &Invitation<'a>| {
            belongs_to(ctx.project, ctx.publication)
        }),
        Rule::new("reviewer_in_publication", |ctx: &Invitation<'a>| {
            ctx.publication.role_of_user(ctx.reviewer).is_some()
        }),
        Rule::new("reviewer_not_yet_invited", |ctx: &Invitation<'a>| {
            ctx.reviewer
                .user_id
                .is_some_and(|reviewer_id| !ctx.project.has_reviewer(reviewer_id))
        }),
    ]
}

fn belongs_to(project: &Project, publication: &Publication) -> bool {
    project.publication_id.is_some() && project.publication_id == publication.publication_id
}

/// Checks whether `reviewer` may be invited to `project`.
#[must_use]
pub fn check_invite_reviewer(
    reviewer: &User,
    publication: &Publication,
    project: &Project,
) -> Verdict {
    evaluate(
        &invitation_rules(),
        &Invitation {
            reviewer,
            publication,
            project,
        },
    )
}

/// Returns `true` if `reviewer` may be invited to `project`.
#[must_use]
pub fn can_invite_reviewer(reviewer: &User, publication: &Publication, project: &Project) -> bool {
    check_invite_reviewer(reviewer, publication, project).is_allowed()
}

struct Submission<'a> {
    owner: &'a User,
    publication: &'a Publication,
}

fn submission_rules<'a>() -> [Rule<Submission<'a>>; 3] {
    [
        Rule::new("owner_active", |ctx: &Submission<'a>| ctx.owner.is_active()),
        Rule::new("publication_live", |ctx: &Submission<'a>| {
            ctx.publication.is_live()
        }),
        Rule::new("owner_in_publication", |ctx: &Submission<'a>| {
            ctx.publication.role_of_user(ctx.owner).is_some()
        }),
    ]
}

/// Checks whether `owner` may submit a project to `publication`.
#[must_use]
pub fn check_create_project(owner: &User, publication: &Publication) -> Verdict {
    evaluate(&submission_rules(), &Submission { owner, publication })
}

/// Returns `true` if `owner` may submit a project to `publication`.
#[must_use]
pub fn can_create_project(owner: &User, publication: &Publication) -> bool {
    check_create_project(owner, publication).is_allowed()
}

struct Closing<'a> {
    user: &'a User,
    publication: &'a Publication,
    project: &'a Project,
}

fn project_owner_rules<'a>() -> [Rule<Closing<'a>>; 2] {
    [
        Rule::new("user_active", |ctx: &Closing<'a>| ctx.user.is_active()),
        Rule::new("user_owns_project", |ctx: &Closing<'a>| {
            ctx.user.user_id.is_some_and(|id| ctx.project.is_owned_by(id))
        }),
    ]
}

fn publication_staff_rules<'a>() -> [Rule<Closing<'a>>; 3] {
    [
        Rule::new("user_active", |ctx: &Closing<'a>| ctx.user.is_active()),
        Rule::new("project_in_publication", |ctx: &Closing<'a>| {
            belongs_to(ctx.project, ctx.publication)
        }),
        Rule::new("user_owns_or_edits_publication", |ctx: &Closing<'a>| {
            matches!(
                ctx.publication.role_of_user(ctx.user),
                Some(PublicationRole::Owner | PublicationRole::Editor)
            )
        }),
    ]
}

/// Checks whether `user` may close `project`: its owner may, and so may the
/// owner or an editor of the project's publication.
///
/// A denial names the rule from the publication staff path.
#[must_use]
pub fn check_close_project(user: &User, publication: &Publication, project: &Project) -> Verdict {
    let context = Closing {
        user,
        publication,
        project,
    };
    evaluate(&project_owner_rules(), &context)
        .or_else(|| evaluate(&publication_staff_rules(), &context))
}

/// Returns `true` if `user` may close `project`.
#[must_use]
pub fn can_close_project(user: &User, publication: &Publication, project: &Project) -> bool {
    check_close_project(user, publication, project).is_allowed()
}
