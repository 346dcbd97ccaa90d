//! Application layer for the Session Lifecycle context.

pub mod command_handlers;
pub mod query_handlers;
