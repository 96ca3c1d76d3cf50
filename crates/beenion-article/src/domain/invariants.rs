//! Article permissions: ownership, or the newsletter privilege for articles
//! that belong to the newsletter.

use beenion_core::invariant::{Rule, Verdict, evaluate};
use beenion_newsletter::domain::aggregates::Newsletter;
use beenion_newsletter::domain::events::NewsletterPrivilege;
use beenion_newsletter::domain::privileges::check_privilege;
use beenion_user::domain::aggregates::User;

use super::aggregates::Article;

struct Access<'a> {
    user: &'a User,
    newsletter: &'a Newsletter,
    article: &'a Article,
}

fn ownership_rules<'a>() -> [Rule<Access<'a>>; 1] {
    [Rule::new("user_owns_article", |ctx: &Access<'a>| {
        ctx.article.owner_id.is_some() && ctx.article.owner_id == ctx.user.user_id
    })]
}

fn membership_rules<'a>() -> [Rule<Access<'a>>; 1] {
    [Rule::new("article_in_newsletter", |ctx: &Access<'a>| {
        ctx.article.newsletter_id.is_some()
            && ctx.article.newsletter_id == ctx.newsletter.newsletter_id
    })]
}

fn check_access(
    user: &User,
    newsletter: &Newsletter,
    article: &Article,
    privilege: NewsletterPrivilege,
) -> Verdict {
    let context = Access {
        user,
        newsletter,
        article,
    };
    evaluate(&ownership_rules(), &context).or_else(|| {
        match evaluate(&membership_rules(), &context) {
            Verdict::Allowed => check_privilege(user, newsletter, privilege),
            denied @ Verdict::Denied { .. } => denied,
        }
    })
}

/// Checks whether `user` may update `article`.
#[must_use]
pub fn check_update_article(user: &User, newsletter: &Newsletter, article: &Article) -> Verdict {
    check_access(user, newsletter, article, NewsletterPrivilege::UpdateArticle)
}

/// Returns `true` if `user` may update `article`.
#[must_use]
pub fn may_update_article(user: &User, newsletter: &Newsletter, article: &Article) -> bool {
    check_update_article(user, newsletter, article).is_allowed()
}

/// Checks whether `user` may delete `article`.
#[must_use]
pub fn check_delete_article(user: &User, newsletter: &Newsletter, article: &Article) -> Verdict {
    check_access(user, newsletter, article, NewsletterPrivilege::DeleteArticle)
}

/// Returns `true` if `user` may delete `article`.
#[must_use]
pub fn may_delete_article(user: &User, newsletter: &Newsletter, article: &Article) -> bool {
    check_delete_article(user, newsletter, article).is_allowed()
}
