//! Shared application state.

use std::sync::Arc;

use soupbowl_core::clock::Clock;
use soupbowl_core::id::IdGenerator;
use soupbowl_core::repository::Repository;
use soupbowl_entry::domain::aggregates::Entry;
use soupbowl_library::{ReadingLibrary, TaskLibrary};
use soupbowl_session::domain::aggregates::Session;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock for phase and status timestamps.
    pub clock: Arc<dyn Clock>,
    /// Identifier source for new sessions and entries.
    pub ids: Arc<dyn IdGenerator>,
    /// Session store.
    pub session_repository: Arc<dyn Repository<Session>>,
    /// Entry store.
    pub entry_repository: Arc<dyn Repository<Entry>>,
    /// Readings loaded at startup.
    pub readings: Arc<ReadingLibrary>,
    /// Tasks loaded at startup.
    pub tasks: Arc<TaskLibrary>,
    /// Expected `X-Admin-Password` value.
    pub admin_password: Arc<str>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        session_repository: Arc<dyn Repository<Session>>,
        entry_repository: Arc<dyn Repository<Entry>>,
        readings: ReadingLibrary,
        tasks: TaskLibrary,
        admin_password: &str,
    ) -> Self {
        Self {
            clock,
            ids,
            session_repository,
            entry_repository,
            readings: Arc::new(readings),
            tasks: Arc::new(tasks),
            admin_password: Arc::from(admin_password),
        }
    }
}
