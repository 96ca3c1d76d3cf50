//! Application layer for the Article context.

pub mod command_handlers;
