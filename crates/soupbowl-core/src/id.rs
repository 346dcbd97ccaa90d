//! Identifier generation abstraction for determinism.
//!
//! In production, this hands out random v4 UUIDs. In tests, a
//! sequenced implementation is injected so created ids are known.

use uuid::Uuid;

/// Abstraction over globally-unique identifier generation.
pub trait IdGenerator: Send + Sync {
    /// Returns a fresh identifier.
    fn next_id(&self) -> Uuid;
}

/// Production generator backed by random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV4Generator;

impl IdGenerator for UuidV4Generator {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_v4_generator_produces_distinct_v4_ids() {
        let generator = UuidV4Generator;

        let first = generator.next_id();
        let second = generator.next_id();

        assert_ne!(first, second);
        assert_eq!(first.get_version_num(), 4);
    }
}
