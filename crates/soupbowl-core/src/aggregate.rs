//! Aggregate root abstraction.

use uuid::Uuid;

/// Trait for entities that are loaded and saved as a unit.
pub trait AggregateRoot: Clone + Send + Sync + 'static {
    /// Returns the aggregate identifier.
    fn aggregate_id(&self) -> Uuid;

    /// Returns the human-chosen unique key, if the aggregate has one.
    fn natural_key(&self) -> Option<&str> {
        None
    }
}
