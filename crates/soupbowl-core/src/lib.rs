//! SoupBowl Core — shared domain abstractions.
//!
//! This crate defines the traits and types that the session and entry
//! contexts depend on: time, identity, errors and the entity store
//! contract. It contains no infrastructure code.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod error;
pub mod id;
pub mod repository;
