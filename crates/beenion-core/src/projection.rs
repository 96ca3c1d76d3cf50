//! Projection abstraction: history in, snapshot out.

use crate::event::{DomainEvent, History, Recorded};

/// Trait for snapshots that are rebuilt by folding an event history.
///
/// Implementations must be pure: `apply` depends only on the previous
/// snapshot and the event, so projecting the same history always yields the
/// same snapshot.
pub trait Projection: Sized {
    /// The event family this snapshot folds.
    type Event: DomainEvent;

    /// The snapshot of an aggregate with no history.
    fn initial() -> Self;

    /// Returns the snapshot that follows `self` once `event` has happened.
    #[must_use]
    fn apply(self, event: &Self::Event) -> Self;

    /// Folds `history` left to right, starting from `initial()`.
    ///
    /// Records this family does not recognize leave the snapshot unchanged.
    #[must_use]
    fn project(history: &History<Self::Event>) -> Self {
        history
            .records()
            .iter()
            .fold(Self::initial(), |snapshot, record| match record {
                Recorded::Known(event) => snapshot.apply(event),
                Recorded::Unrecognized { .. } => snapshot,
            })
    }
}
