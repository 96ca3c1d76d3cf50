//! Shape validators for newsletter histories and privilege scalars.

use std::collections::BTreeSet;

use beenion_core::error::InputError;
use beenion_core::event::History;
use beenion_core::validation::{is_history, validate_history};
use serde::Deserialize;
use serde_json::Value;

use super::events::{NewsletterEvent, NewsletterPrivilege, NewsletterRole};

const PRIVILEGE_EXPECTED: &str = "one of createArticle, updateArticle, deleteArticle";
const ROLES_EXPECTED: &str = "a list of owner, editor";

/// Returns `true` if `value` is a well-formed newsletter history.
#[must_use]
pub fn is_newsletter_history(value: &Value) -> bool {
    is_history::<NewsletterEvent>(value)
}

/// Validates the newsletter history held in command field `field`.
///
/// # Errors
///
/// Returns `InputError::InvalidHistory` for the newsletter kind.
pub fn validate_newsletter_history(
    field: &'static str,
    value: &Value,
) -> Result<History<NewsletterEvent>, InputError> {
    validate_history(field, value)
}

/// Validates a privilege tag.
///
/// # Errors
///
/// Returns `InputError::InvalidValue` for anything but a known tag.
pub fn validate_privilege(
    field: &'static str,
    value: &Value,
) -> Result<NewsletterPrivilege, InputError> {
    NewsletterPrivilege::deserialize(value).map_err(|_| InputError::InvalidValue {
        field,
        expected: PRIVILEGE_EXPECTED,
    })
}

/// Validates a list of role tags. An empty list is allowed and revokes the
/// privilege from every role.
///
/// # Errors
///
/// Returns `InputError::InvalidValue` unless `value` is an array of known
/// role tags.
pub fn validate_roles(
    field: &'static str,
    value: &Value,
) -> Result<BTreeSet<NewsletterRole>, InputError> {
    BTreeSet::<NewsletterRole>::deserialize(value).map_err(|_| InputError::InvalidValue {
        field,
        expected: ROLES_EXPECTED,
    })
}
