//! SoupBowl — Session Lifecycle bounded context.
//!
//! Responsible for moving a visitor through the fixed story phases,
//! exit bookkeeping, the readings unlock check, and the aggregate
//! metrics admins see over all sessions.

pub mod application;
pub mod domain;
