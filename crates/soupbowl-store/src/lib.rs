//! SoupBowl — `PostgreSQL` persistence.
//!
//! State-based repositories: each aggregate is one row, saved with an
//! upsert keyed by its identifier. Schema lives in the workspace
//! `migrations/` directory.

pub mod pg_entry_repository;
pub mod pg_session_repository;

use soupbowl_core::error::DomainError;

pub use pg_entry_repository::PgEntryRepository;
pub use pg_session_repository::PgSessionRepository;

/// Wraps a database failure as an infrastructure error.
pub(crate) fn infrastructure(err: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(err.to_string())
}

/// Parses a persisted enum column, treating unknown values as corrupt data.
pub(crate) fn parse_column<T>(column: &'static str, value: &str) -> Result<T, DomainError>
where
    T: std::str::FromStr<Err = DomainError>,
{
    value.parse().map_err(|err: DomainError| {
        DomainError::Infrastructure(format!("corrupt {column} column: {err}"))
    })
}
