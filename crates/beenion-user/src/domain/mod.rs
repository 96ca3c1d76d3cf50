//! Domain layer for the User context.

pub mod aggregates;
pub mod events;
pub mod validation;
