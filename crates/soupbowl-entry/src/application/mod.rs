//! Application layer for the Entry Authoring context.

pub mod command_handlers;
pub mod query_handlers;
