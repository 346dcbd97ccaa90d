//! SoupBowl — HTTP API.
//!
//! Exposed as a library so integration tests can build the same router
//! `main.rs` serves.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
