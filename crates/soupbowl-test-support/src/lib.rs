//! Shared test mocks and utilities for the SoupBowl narrative service.

mod clock;
mod ids;
mod repository;

pub use clock::FixedClock;
pub use ids::SequenceIds;
pub use repository::{FailingRepository, InMemoryRepository};
