//! `PostgreSQL` implementation of `Repository<Session>`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use soupbowl_core::error::DomainError;
use soupbowl_core::repository::Repository;
use soupbowl_session::domain::aggregates::{Phase, PhaseTimestamps, Session};

use crate::{infrastructure, parse_column};

const SELECT_SESSIONS: &str = r"
SELECT id, current_phase, quit_phase, created_at, hazard_accepted_at,
       code_submitted_at, failure_revealed_at, fork_reached_at, exited_at
FROM user_sessions
";

const UPSERT_SESSION: &str = r"
INSERT INTO user_sessions (
    id, current_phase, quit_phase, created_at, hazard_accepted_at,
    code_submitted_at, failure_revealed_at, fork_reached_at, exited_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
ON CONFLICT (id) DO UPDATE SET
    current_phase       = EXCLUDED.current_phase,
    quit_phase          = EXCLUDED.quit_phase,
    hazard_accepted_at  = EXCLUDED.hazard_accepted_at,
    code_submitted_at   = EXCLUDED.code_submitted_at,
    failure_revealed_at = EXCLUDED.failure_revealed_at,
    fork_reached_at     = EXCLUDED.fork_reached_at,
    exited_at           = EXCLUDED.exited_at
";

#[derive(Debug, FromRow)]
struct SessionRow {
    id: Uuid,
    current_phase: String,
    quit_phase: Option<String>,
    created_at: DateTime<Utc>,
    hazard_accepted_at: Option<DateTime<Utc>>,
    code_submitted_at: Option<DateTime<Utc>>,
    failure_revealed_at: Option<DateTime<Utc>>,
    fork_reached_at: Option<DateTime<Utc>>,
    exited_at: Option<DateTime<Utc>>,
}

impl TryFrom<SessionRow> for Session {
    type Error = DomainError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        let current_phase: Phase = parse_column("current_phase", &row.current_phase)?;
        let quit_phase = row
            .quit_phase
            .as_deref()
            .map(|value| parse_column::<Phase>("quit_phase", value))
            .transpose()?;
        Ok(Session::restore(
            row.id,
            current_phase,
            quit_phase,
            PhaseTimestamps {
                created_at: row.created_at,
                hazard_accepted_at: row.hazard_accepted_at,
                code_submitted_at: row.code_submitted_at,
                failure_revealed_at: row.failure_revealed_at,
                fork_reached_at: row.fork_reached_at,
                exited_at: row.exited_at,
            },
        ))
    }
}

/// PostgreSQL-backed session repository.
#[derive(Debug, Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    /// Creates a new `PgSessionRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Session> for PgSessionRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Session>, DomainError> {
        let row: Option<SessionRow> = sqlx::query_as(&format!("{SELECT_SESSIONS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infrastructure)?;
        row.map(Session::try_from).transpose()
    }

    async fn find_by_natural_key(&self, _key: &str) -> Result<Option<Session>, DomainError> {
        Ok(None)
    }

    async fn find_all(&self) -> Result<Vec<Session>, DomainError> {
        let rows: Vec<SessionRow> =
            sqlx::query_as(&format!("{SELECT_SESSIONS} ORDER BY created_at"))
                .fetch_all(&self.pool)
                .await
                .map_err(infrastructure)?;
        rows.into_iter().map(Session::try_from).collect()
    }

    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let t = session.timestamps();
        sqlx::query(UPSERT_SESSION)
            .bind(session.id())
            .bind(session.current_phase().as_str())
            .bind(session.quit_phase().map(Phase::as_str))
            .bind(t.created_at)
            .bind(t.hazard_accepted_at)
            .bind(t.code_submitted_at)
            .bind(t.failure_revealed_at)
            .bind(t.fork_reached_at)
            .bind(t.exited_at)
            .execute(&self.pool)
            .await
            .map_err(infrastructure)?;
        debug!(session_id = %session.id(), phase = %session.current_phase(), "saved session");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM user_sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(())
    }
}
