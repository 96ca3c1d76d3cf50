//! Shape validators for raw command inputs.
//!
//! Validators only check structure. They never look at what an identifier
//! refers to or whether an actor may do something; that is the job of the
//! invariant evaluators. Each validator returns the typed value on success so
//! that later stages can only ever see validated input.

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{InputError, ShapeViolation};
use crate::event::{DomainEvent, History, Recorded, Timestamp};

/// Longest accepted text scalar, in characters.
pub const MAX_TEXT_LEN: usize = 200;

/// Checks that `value` is a history of the `E` family.
///
/// # Errors
///
/// Returns the first `ShapeViolation` found, scanning records in order.
pub fn check_history<E: DomainEvent>(value: &Value) -> Result<History<E>, ShapeViolation> {
    let Value::Array(records) = value else {
        return Err(ShapeViolation::NotASequence);
    };
    records
        .iter()
        .enumerate()
        .map(|(index, record)| check_record::<E>(index, record))
        .collect::<Result<Vec<_>, _>>()
        .map(History::new)
}

fn check_record<E: DomainEvent>(index: usize, record: &Value) -> Result<Recorded<E>, ShapeViolation> {
    let Value::Object(fields) = record else {
        return Err(ShapeViolation::NotARecord { index });
    };
    let Some(Value::String(event_type)) = fields.get("type") else {
        return Err(ShapeViolation::MissingType { index });
    };
    if !matches!(fields.get("payload"), Some(Value::Object(_))) {
        return Err(ShapeViolation::MissingPayload { index });
    }
    if !E::EVENT_TYPES.contains(&event_type.as_str()) {
        return Ok(Recorded::Unrecognized {
            event_type: event_type.clone(),
        });
    }
    E::deserialize(record)
        .map(Recorded::Known)
        .map_err(|err| ShapeViolation::MalformedPayload {
            index,
            event_type: event_type.clone(),
            reason: err.to_string(),
        })
}

/// Validates the history held in command field `field`.
///
/// # Errors
///
/// Returns `InputError::InvalidHistory` naming `field` and `E::KIND`.
pub fn validate_history<E: DomainEvent>(
    field: &'static str,
    value: &Value,
) -> Result<History<E>, InputError> {
    check_history::<E>(value).map_err(|violation| InputError::InvalidHistory {
        field,
        kind: E::KIND,
        violation,
    })
}

/// Returns `true` if `value` is a well-formed history of the `E` family.
#[must_use]
pub fn is_history<E: DomainEvent>(value: &Value) -> bool {
    check_history::<E>(value).is_ok()
}

/// Validates a timestamp: a non-negative integer millisecond count.
///
/// # Errors
///
/// Returns `InputError::InvalidTimestamp` for any other value.
pub fn validate_timestamp(field: &'static str, value: &Value) -> Result<Timestamp, InputError> {
    value
        .as_i64()
        .and_then(|millis| Timestamp::from_millis(millis).ok())
        .ok_or(InputError::InvalidTimestamp { field })
}

/// Returns `true` if `value` is an acceptable timestamp.
#[must_use]
pub fn is_timestamp(value: &Value) -> bool {
    validate_timestamp("timestamp", value).is_ok()
}

/// Validates an identifier given as a UUID string.
///
/// # Errors
///
/// Returns `InputError::InvalidIdentifier` if `value` is not a UUID string.
pub fn validate_identifier(field: &'static str, value: &Value) -> Result<Uuid, InputError> {
    value
        .as_str()
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .ok_or(InputError::InvalidIdentifier { field })
}

/// Validates a text scalar: a string that is not blank and not longer than
/// `MAX_TEXT_LEN` characters once trimmed. Returns the trimmed text.
///
/// # Errors
///
/// Returns `InputError::InvalidText` otherwise.
pub fn validate_text(field: &'static str, value: &Value) -> Result<String, InputError> {
    let text = value
        .as_str()
        .map(str::trim)
        .ok_or(InputError::InvalidText { field })?;
    if text.is_empty() || text.chars().count() > MAX_TEXT_LEN {
        return Err(InputError::InvalidText { field });
    }
    Ok(text.to_owned())
}
