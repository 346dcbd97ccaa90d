//! Test ids — deterministic `IdGenerator` implementation for tests.

use std::sync::Mutex;

use soupbowl_core::id::IdGenerator;
use uuid::Uuid;

/// An id generator that returns values from a predetermined sequence. Panics
/// if the sequence is exhausted.
#[derive(Debug)]
pub struct SequenceIds {
    values: Vec<Uuid>,
    index: Mutex<usize>,
}

impl SequenceIds {
    /// Create a new `SequenceIds` handing out `values` in order.
    #[must_use]
    pub fn new(values: Vec<Uuid>) -> Self {
        Self {
            values,
            index: Mutex::new(0),
        }
    }
}

impl IdGenerator for SequenceIds {
    fn next_id(&self) -> Uuid {
        let mut index = self.index.lock().unwrap();
        let id = self.values[*index];
        *index += 1;
        id
    }
}
