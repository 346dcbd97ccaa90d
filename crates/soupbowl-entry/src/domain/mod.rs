//! Domain layer for the Entry Authoring context.

pub mod aggregates;
pub mod commands;
