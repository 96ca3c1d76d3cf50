//! Shape validators for article histories.

use beenion_core::error::InputError;
use beenion_core::event::History;
use beenion_core::validation::{is_history, validate_history};
use serde_json::Value;

use super::events::ArticleEvent;

/// Returns `true` if `value` is a well-formed article history.
#[must_use]
pub fn is_article_history(value: &Value) -> bool {
    is_history::<ArticleEvent>(value)
}

/// Validates the article history held in command field `field`.
///
/// # Errors
///
/// Returns `InputError::InvalidHistory` for the article kind.
pub fn validate_article_history(
    field: &'static str,
    value: &Value,
) -> Result<History<ArticleEvent>, InputError> {
    validate_history(field, value)
}
