//! Domain event abstractions.
//!
//! Every event travels as `{ "type": <tag>, "payload": { ...fields, "timestamp" } }`.
//! Event families derive `Serialize`/`Deserialize` with
//! `#[serde(tag = "type", content = "payload")]` to match that shape.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The kinds of aggregate whose histories the kernel folds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateKind {
    /// A platform user.
    User,
    /// A publication that reviews projects.
    Publication,
    /// A project submitted to a publication.
    Project,
    /// An article published in a newsletter.
    Article,
    /// A newsletter that hosts articles.
    Newsletter,
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::User => "user",
            Self::Publication => "publication",
            Self::Project => "project",
            Self::Article => "article",
            Self::Newsletter => "newsletter",
        };
        f.write_str(name)
    }
}

/// Returned when a millisecond count cannot be a `Timestamp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("timestamp out of range: {0}")]
pub struct TimestampOutOfRange(pub i64);

/// Milliseconds since the Unix epoch, stamped onto emitted events.
///
/// Always non-negative and representable as a UTC instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Timestamp(i64);

impl Timestamp {
    /// Builds a timestamp from a millisecond count.
    ///
    /// # Errors
    ///
    /// Returns `TimestampOutOfRange` for negative counts or counts outside
    /// the range chrono can represent.
    pub fn from_millis(millis: i64) -> Result<Self, TimestampOutOfRange> {
        if millis >= 0 && DateTime::<Utc>::from_timestamp_millis(millis).is_some() {
            Ok(Self(millis))
        } else {
            Err(TimestampOutOfRange(millis))
        }
    }

    /// Returns the millisecond count.
    #[must_use]
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Returns the instant this timestamp denotes.
    #[must_use]
    pub fn to_datetime(self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(self.0).unwrap_or_default()
    }
}

impl TryFrom<i64> for Timestamp {
    type Error = TimestampOutOfRange;

    fn try_from(millis: i64) -> Result<Self, Self::Error> {
        Self::from_millis(millis)
    }
}

impl From<Timestamp> for i64 {
    fn from(timestamp: Timestamp) -> Self {
        timestamp.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        // Pre-epoch instants clamp to the epoch.
        Self(instant.timestamp_millis().max(0))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trait that every closed event family implements.
pub trait DomainEvent:
    Serialize + DeserializeOwned + Clone + fmt::Debug + PartialEq + Send + Sync
{
    /// The aggregate kind whose history carries this family.
    const KIND: AggregateKind;

    /// Every `type` tag this family recognizes.
    const EVENT_TYPES: &'static [&'static str];

    /// Returns the event type tag.
    fn event_type(&self) -> &'static str;

    /// Returns the timestamp stamped onto the event.
    fn timestamp(&self) -> Timestamp;

    /// Serializes the event payload to JSON.
    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        let mut document =
            serde_json::to_value(self).expect("DomainEvent serialization is infallible");
        document
            .get_mut("payload")
            .map(serde_json::Value::take)
            .unwrap_or_default()
    }
}

/// One entry of a validated history.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded<E> {
    /// An event of the aggregate's own family.
    Known(E),
    /// A well-formed record whose tag this family does not know.
    Unrecognized {
        /// The unrecognized tag.
        event_type: String,
    },
}

/// An ordered, validated event history of one aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct History<E> {
    records: Vec<Recorded<E>>,
}

impl<E> History<E> {
    /// Wraps already validated records, preserving their order.
    #[must_use]
    pub fn new(records: Vec<Recorded<E>>) -> Self {
        Self { records }
    }

    /// Returns the records in causal order.
    #[must_use]
    pub fn records(&self) -> &[Recorded<E>] {
        &self.records
    }

    /// Returns the number of records, unrecognized ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the history holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the recognized events only.
    pub fn known(&self) -> impl Iterator<Item = &E> {
        self.records.iter().filter_map(|record| match record {
            Recorded::Known(event) => Some(event),
            Recorded::Unrecognized { .. } => None,
        })
    }
}

impl<E> Default for History<E> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<E> From<Vec<E>> for History<E> {
    fn from(events: Vec<E>) -> Self {
        Self::new(events.into_iter().map(Recorded::Known).collect())
    }
}
