//! Test repositories — mock `Repository` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use soupbowl_core::aggregate::AggregateRoot;
use soupbowl_core::error::DomainError;
use soupbowl_core::repository::Repository;
use uuid::Uuid;

/// A repository that keeps aggregates in memory, in insertion order, and
/// counts saves so tests can assert that failed operations never persist.
#[derive(Debug)]
pub struct InMemoryRepository<A> {
    items: Mutex<Vec<A>>,
    saves: Mutex<usize>,
}

impl<A: AggregateRoot> InMemoryRepository<A> {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::with(Vec::new())
    }

    /// Create a repository pre-populated with `items`.
    #[must_use]
    pub fn with(items: Vec<A>) -> Self {
        Self {
            items: Mutex::new(items),
            saves: Mutex::new(0),
        }
    }

    /// Returns a snapshot of all stored aggregates.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn snapshot(&self) -> Vec<A> {
        self.items.lock().unwrap().clone()
    }

    /// Returns how many times `save` has been called.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

impl<A: AggregateRoot> Default for InMemoryRepository<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<A: AggregateRoot> Repository<A> for InMemoryRepository<A> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<A>, DomainError> {
        let items = self.items.lock().unwrap();
        Ok(items.iter().find(|a| a.aggregate_id() == id).cloned())
    }

    async fn find_by_natural_key(&self, key: &str) -> Result<Option<A>, DomainError> {
        let items = self.items.lock().unwrap();
        Ok(items.iter().find(|a| a.natural_key() == Some(key)).cloned())
    }

    async fn find_all(&self) -> Result<Vec<A>, DomainError> {
        Ok(self.items.lock().unwrap().clone())
    }

    async fn save(&self, aggregate: &A) -> Result<(), DomainError> {
        *self.saves.lock().unwrap() += 1;
        let mut items = self.items.lock().unwrap();
        let id = aggregate.aggregate_id();
        match items.iter_mut().find(|a| a.aggregate_id() == id) {
            Some(existing) => *existing = aggregate.clone(),
            None => items.push(aggregate.clone()),
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.items.lock().unwrap().retain(|a| a.aggregate_id() != id);
        Ok(())
    }
}

/// A repository that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingRepository;

#[async_trait]
impl<A: AggregateRoot> Repository<A> for FailingRepository {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<A>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn find_by_natural_key(&self, _key: &str) -> Result<Option<A>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn find_all(&self) -> Result<Vec<A>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn save(&self, _aggregate: &A) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn delete(&self, _id: Uuid) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
