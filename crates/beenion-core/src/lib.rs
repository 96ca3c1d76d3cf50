//! Beenion Core: shared write-side kernel.
//!
//! This crate defines the pieces every bounded context builds its commands
//! from: the event wire shape, shape validators, the projection fold, the
//! invariant rule DSL and the command handler template. Everything here is
//! pure except the `Clock` and `EventRepository` seams used by the
//! application layers.

pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod invariant;
pub mod projection;
pub mod repository;
pub mod validation;
