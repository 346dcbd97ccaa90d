//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
///
/// Every state-machine operation either returns the mutated entity or
/// exactly one of these; nothing is partially applied.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No entity exists for the given identifier or key.
    #[error("{entity} not found: {key}")]
    NotFound {
        /// Kind of entity that was looked up.
        entity: &'static str,
        /// The identifier or slug that was not found.
        key: String,
    },

    /// A session has no forward move from its current phase.
    #[error("cannot advance from terminal phase {0}")]
    TerminalState(String),

    /// An entry has no forward move under `advance` from its current status.
    #[error("cannot advance from status {0}")]
    InvalidTransition(String),

    /// A completeness gate was not satisfied.
    #[error("{phase} phase is incomplete: {} must be filled", .fields.join(", "))]
    IncompleteFields {
        /// The authoring phase whose gate failed.
        phase: &'static str,
        /// The blank fields.
        fields: Vec<&'static str>,
    },

    /// The operation requires a status the entry does not currently hold.
    #[error("operation requires status {expected}, current status is {actual}")]
    WrongStatus {
        /// The required status.
        expected: String,
        /// The status actually held.
        actual: String,
    },

    /// Deletion was attempted on published content.
    #[error("entry {0} is published; unpublish it before deleting")]
    PublishedEntry(Uuid),

    /// Creation was attempted with a slug that is already taken.
    #[error("slug '{0}' already exists")]
    DuplicateSlug(String),

    /// A field update was attempted before its prerequisite status was reached.
    #[error("status {actual} has not reached {required}")]
    PhaseTooEarly {
        /// The minimum status for the update.
        required: String,
        /// The status actually held.
        actual: String,
    },

    /// Malformed input rejected before reaching a state machine.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Shorthand for a `NotFound` keyed by identifier.
    #[must_use]
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound {
            entity,
            key: id.to_string(),
        }
    }
}
