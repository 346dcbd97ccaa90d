//! Domain layer for the Session Lifecycle context.

pub mod aggregates;
pub mod commands;
pub mod metrics;
