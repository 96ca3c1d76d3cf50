//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

use crate::event::AggregateKind;

/// Why a raw history failed shape validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeViolation {
    /// The value is not an ordered sequence.
    #[error("expected an ordered sequence of events")]
    NotASequence,

    /// An element of the sequence is not an object.
    #[error("record {index} is not an object")]
    NotARecord {
        /// Position of the record in the history.
        index: usize,
    },

    /// A record has no string `type` tag.
    #[error("record {index} has no string `type` tag")]
    MissingType {
        /// Position of the record in the history.
        index: usize,
    },

    /// A record has no `payload` object.
    #[error("record {index} has no `payload` object")]
    MissingPayload {
        /// Position of the record in the history.
        index: usize,
    },

    /// A record of a known type does not decode into that event.
    #[error("record {index} ({event_type}) has a malformed payload: {reason}")]
    MalformedPayload {
        /// Position of the record in the history.
        index: usize,
        /// The record's tag.
        event_type: String,
        /// Decoder message.
        reason: String,
    },
}

/// A command input failed structural validation.
///
/// Each variant names the command field that was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// An event history is malformed.
    #[error("invalid {kind} history in `{field}`: {violation}")]
    InvalidHistory {
        /// The command field holding the history.
        field: &'static str,
        /// The aggregate kind the history was expected to describe.
        kind: AggregateKind,
        /// The first violation found.
        violation: ShapeViolation,
    },

    /// The timestamp is not a valid millisecond count.
    #[error("invalid timestamp in `{field}`")]
    InvalidTimestamp {
        /// The command field holding the timestamp.
        field: &'static str,
    },

    /// An identifier is not a UUID string.
    #[error("invalid identifier in `{field}`")]
    InvalidIdentifier {
        /// The command field holding the identifier.
        field: &'static str,
    },

    /// A text scalar is missing, blank or too long.
    #[error("invalid text in `{field}`")]
    InvalidText {
        /// The command field holding the text.
        field: &'static str,
    },

    /// An enumerated scalar has an unexpected value.
    #[error("invalid value in `{field}`: expected {expected}")]
    InvalidValue {
        /// The command field holding the value.
        field: &'static str,
        /// Description of the accepted values.
        expected: &'static str,
    },
}

/// Top-level domain error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A command input failed shape validation.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// The actor is not authorized to perform the command.
    #[error("permission denied: {command} by {} (rule `{rule}`)", display_actor(.actor))]
    PermissionDenied {
        /// The command type that was refused.
        command: &'static str,
        /// The acting user, if the actor's history named one.
        actor: Option<Uuid>,
        /// The first rule that did not hold.
        rule: &'static str,
    },

    /// A command targets an aggregate whose history is empty.
    #[error("{0} not found")]
    AggregateNotFound(AggregateKind),

    /// Optimistic concurrency conflict.
    #[error(
        "concurrency conflict on aggregate {aggregate_id}: expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        /// The aggregate that had the conflict.
        aggregate_id: Uuid,
        /// The expected version.
        expected: i64,
        /// The actual version found.
        actual: i64,
    },

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

fn display_actor(actor: &Option<Uuid>) -> String {
    actor.map_or_else(|| "unknown actor".to_owned(), |id| id.to_string())
}
