//! Entity store abstraction.

use async_trait::async_trait;
use uuid::Uuid;

use crate::aggregate::AggregateRoot;
use crate::error::DomainError;

/// Repository trait for loading, saving and deleting whole aggregates.
///
/// Saves are upserts with last-writer-wins semantics per identifier.
#[async_trait]
pub trait Repository<A: AggregateRoot>: Send + Sync {
    /// Load an aggregate by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<A>, DomainError>;

    /// Load an aggregate by its natural key (e.g. a slug).
    async fn find_by_natural_key(&self, key: &str) -> Result<Option<A>, DomainError>;

    /// Load every stored aggregate.
    async fn find_all(&self) -> Result<Vec<A>, DomainError>;

    /// Insert or replace an aggregate.
    async fn save(&self, aggregate: &A) -> Result<(), DomainError>;

    /// Remove an aggregate. Removing an absent id is not an error.
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}
