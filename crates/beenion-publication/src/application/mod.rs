//! Application layer for the Publication context.

pub mod command_handlers;
