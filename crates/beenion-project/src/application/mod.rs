//! Application layer for the Project context.

pub mod command_handlers;
