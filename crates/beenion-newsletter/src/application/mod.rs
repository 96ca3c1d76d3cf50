//! Application layer for the Newsletter context.

pub mod command_handlers;
