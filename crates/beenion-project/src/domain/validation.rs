//! Shape validators for project histories.

use beenion_core::error::InputError;
use beenion_core::event::History;
use beenion_core::validation::{is_history, validate_history};
use serde_json::Value;

use super::events::ProjectEvent;

/// Returns `true` if `value` is a well-formed project history.
#[must_use]
pub fn is_project_history(value: &Value) -> bool {
    is_history::<ProjectEvent>(value)
}

/// Validates the project history held in command field `field`.
///
/// # Errors
///
/// Returns `InputError::InvalidHistory` for the project kind.
pub fn validate_project_history(
    field: &'static str,
    value: &Value,
) -> Result<History<ProjectEvent>, InputError> {
    validate_history(field, value)
}
