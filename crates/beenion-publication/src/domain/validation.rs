//! Shape validators for publication histories.

use beenion_core::error::InputError;
use beenion_core::event::History;
use beenion_core::validation::{is_history, validate_history};
use serde_json::Value;

use super::events::PublicationEvent;

/// Returns `true` if `value` is a well-formed publication history.
#[must_use]
pub fn is_publication_history(value: &Value) -> bool {
    is_history::<PublicationEvent>(value)
}

/// Validates the publication history held in command field `field`.
///
/// # Errors
///
/// Returns `InputError::InvalidHistory` for the publication kind.
pub fn validate_publication_history(
    field: &'static str,
    value: &Value,
) -> Result<History<PublicationEvent>, InputError> {
    validate_history(field, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use beenion_core::error::ShapeViolation;
    use beenion_core::event::AggregateKind;
    use serde_json::json;

    #[test]
    fn test_foreign_event_types_are_structurally_valid() {
        let value = json!([{ "type": "UserCreated", "payload": { "anything": true } }]);

        assert!(is_publication_history(&value));
        assert_eq!(validate_publication_history("publication_history", &value).unwrap().len(), 1);
    }

    #[test]
    fn test_record_without_payload_is_rejected() {
        let value = json!([{ "type": "PublicationDeleted" }]);

        assert_eq!(
            validate_publication_history("publication_history", &value),
            Err(InputError::InvalidHistory {
                field: "publication_history",
                kind: AggregateKind::Publication,
                violation: ShapeViolation::MissingPayload { index: 0 },
            })
        );
    }
}
