//! Domain layer for the Project context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod handlers;
pub mod invariants;
pub mod validation;
