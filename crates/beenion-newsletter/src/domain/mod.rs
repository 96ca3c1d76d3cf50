//! Domain layer for the Newsletter context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod handlers;
pub mod privileges;
pub mod validation;
