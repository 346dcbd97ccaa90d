//! Command handlers for the Session Lifecycle context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: load session, run one transition, save.

use soupbowl_core::clock::Clock;
use soupbowl_core::error::DomainError;
use soupbowl_core::id::IdGenerator;
use soupbowl_core::repository::Repository;
use uuid::Uuid;

use crate::domain::aggregates::Session;
use crate::domain::commands::{AdvancePhase, MarkExited, StartSession};

/// Loads a session or fails with `NotFound`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no session has the ID, or the
/// repository's error if loading fails.
pub(crate) async fn load_session(
    session_id: Uuid,
    repo: &dyn Repository<Session>,
) -> Result<Session, DomainError> {
    repo.find_by_id(session_id)
        .await?
        .ok_or_else(|| DomainError::not_found("session", session_id))
}

/// Handles the `StartSession` command: creates a session at the first phase
/// and saves it.
///
/// This is a CREATION command: the handler generates the session ID.
///
/// # Errors
///
/// Returns `DomainError` if saving fails.
pub async fn handle_start_session(
    _command: &StartSession,
    clock: &dyn Clock,
    ids: &dyn IdGenerator,
    repo: &dyn Repository<Session>,
) -> Result<Session, DomainError> {
    let session = Session::start(ids.next_id(), clock);
    repo.save(&session).await?;
    Ok(session)
}

/// Handles the `AdvancePhase` command: loads the session, moves it one phase
/// forward, and saves it.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown session,
/// `DomainError::TerminalState` if the session cannot move forward, or the
/// repository's error.
pub async fn handle_advance_phase(
    command: &AdvancePhase,
    clock: &dyn Clock,
    repo: &dyn Repository<Session>,
) -> Result<Session, DomainError> {
    let mut session = load_session(command.session_id, repo).await?;
    session.advance_phase(clock)?;
    repo.save(&session).await?;
    Ok(session)
}

/// Handles the `MarkExited` command: loads the session, records the exit,
/// and saves it.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown session, or the
/// repository's error.
pub async fn handle_mark_exited(
    command: &MarkExited,
    clock: &dyn Clock,
    repo: &dyn Repository<Session>,
) -> Result<Session, DomainError> {
    let mut session = load_session(command.session_id, repo).await?;
    session.mark_exited(clock);
    repo.save(&session).await?;
    Ok(session)
}
