//! Domain layer for the Publication context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod handlers;
pub mod invariants;
pub mod validation;
