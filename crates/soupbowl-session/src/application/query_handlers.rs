//! Query handlers for the Session Lifecycle context.
//!
//! This module contains query handlers that load sessions and return
//! read-only view DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use soupbowl_core::error::DomainError;
use soupbowl_core::repository::Repository;
use uuid::Uuid;

use crate::application::command_handlers::load_session;
use crate::domain::aggregates::{Phase, Session};
use crate::domain::metrics::SessionMetrics;

/// Read-only view of a session, in the shape the story frontend consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    /// The session identifier.
    pub id: Uuid,
    /// The phase the visitor is in.
    pub current_phase: Phase,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the hazard warning was accepted.
    pub hazard_accepted_at: Option<DateTime<Utc>>,
    /// When code was submitted.
    pub code_submitted_at: Option<DateTime<Utc>>,
    /// When the hidden failure was revealed.
    pub failure_revealed_at: Option<DateTime<Utc>>,
    /// When the fork was reached.
    pub fork_reached_at: Option<DateTime<Utc>>,
    /// When the visitor quit.
    pub exited_at: Option<DateTime<Utc>>,
    /// The phase the visitor quit from.
    pub quit_phase: Option<Phase>,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        let t = session.timestamps();
        Self {
            id: session.id(),
            current_phase: session.current_phase(),
            created_at: t.created_at,
            hazard_accepted_at: t.hazard_accepted_at,
            code_submitted_at: t.code_submitted_at,
            failure_revealed_at: t.failure_revealed_at,
            fork_reached_at: t.fork_reached_at,
            exited_at: t.exited_at,
            quit_phase: session.quit_phase(),
        }
    }
}

/// Retrieves a session by its ID.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no session has the ID.
pub async fn get_session_by_id(
    session_id: Uuid,
    repo: &dyn Repository<Session>,
) -> Result<SessionView, DomainError> {
    let session = load_session(session_id, repo).await?;
    Ok(SessionView::from(&session))
}

/// Whether the session may read the readings library. Unknown sessions are
/// locked.
///
/// # Errors
///
/// Returns the repository's error if loading fails.
pub async fn is_session_unlocked(
    session_id: Uuid,
    repo: &dyn Repository<Session>,
) -> Result<bool, DomainError> {
    Ok(repo
        .find_by_id(session_id)
        .await?
        .is_some_and(|session| session.is_unlocked()))
}

/// Summarises every stored session.
///
/// # Errors
///
/// Returns the repository's error if loading fails.
pub async fn get_session_metrics(
    repo: &dyn Repository<Session>,
) -> Result<SessionMetrics, DomainError> {
    let sessions = repo.find_all().await?;
    Ok(SessionMetrics::from_sessions(&sessions))
}
