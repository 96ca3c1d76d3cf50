//! Shape validators for user histories.

use beenion_core::error::InputError;
use beenion_core::event::History;
use beenion_core::validation::{is_history, validate_history};
use serde_json::Value;

use super::events::UserEvent;

/// Returns `true` if `value` is a well-formed user history.
#[must_use]
pub fn is_user_history(value: &Value) -> bool {
    is_history::<UserEvent>(value)
}

/// Validates the user history held in command field `field`.
///
/// # Errors
///
/// Returns `InputError::InvalidHistory` for the user kind.
pub fn validate_user_history(
    field: &'static str,
    value: &Value,
) -> Result<History<UserEvent>, InputError> {
    validate_history(field, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::UserCreated;
    use beenion_core::error::ShapeViolation;
    use beenion_core::event::{AggregateKind, Timestamp};
    use beenion_test_support::history;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn test_is_user_history_accepts_encoded_events() {
        let events = vec![UserEvent::UserCreated(UserCreated {
            user_id: Uuid::new_v4(),
            name: "Ada".to_owned(),
            timestamp: Timestamp::from_millis(5).unwrap(),
        })];

        assert!(is_user_history(&history(&events)));
        assert!(is_user_history(&json!([])));
    }

    #[test]
    fn test_user_created_without_name_is_malformed() {
        let value = json!([{
            "type": "UserCreated",
            "payload": { "userId": Uuid::new_v4(), "timestamp": 5 }
        }]);

        match validate_user_history("reviewer_history", &value) {
            Err(InputError::InvalidHistory {
                field,
                kind,
                violation: ShapeViolation::MalformedPayload { index, .. },
            }) => {
                assert_eq!(field, "reviewer_history");
                assert_eq!(kind, AggregateKind::User);
                assert_eq!(index, 0);
            }
            other => panic!("expected MalformedPayload, got {other:?}"),
        }
    }

    #[test]
    fn test_non_sequence_is_not_a_user_history() {
        assert!(!is_user_history(&json!({ "userId": "x" })));
        assert!(!is_user_history(&json!("UserCreated")));
    }
}
