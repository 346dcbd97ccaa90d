//! SoupBowl — Entry Authoring bounded context.
//!
//! Responsible for the admin authoring workflow of soup entries: the
//! example, explanation and article drafting phases, the completeness
//! gates between them, publication, and the public catalog queries.

pub mod application;
pub mod domain;
