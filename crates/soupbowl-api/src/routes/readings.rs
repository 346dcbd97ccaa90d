//! Routes for the readings library, gated on session progress.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::{Json, Router, routing::get};
use soupbowl_core::error::DomainError;
use soupbowl_library::Reading;
use soupbowl_session::application::query_handlers;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Header naming the visitor's session.
pub const SESSION_ID_HEADER: &str = "x-session-id";

/// Fails with `ReadingsLocked` unless the request names a session at or
/// past the fork. Missing or malformed session ids are locked, and so is
/// any session the store cannot be asked about.
async fn ensure_unlocked(headers: &HeaderMap, state: &AppState) -> Result<(), ApiError> {
    let session_id = headers
        .get(SESSION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<Uuid>().ok());
    let Some(session_id) = session_id else {
        debug!("readings requested without a usable session id");
        return Err(ApiError::ReadingsLocked);
    };

    match query_handlers::is_session_unlocked(session_id, &*state.session_repository).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(ApiError::ReadingsLocked),
        Err(err) => {
            warn!(%session_id, error = %err, "unlock check failed, treating session as locked");
            Err(ApiError::ReadingsLocked)
        }
    }
}

/// GET /
#[instrument(skip_all)]
async fn list_readings(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Reading>>, ApiError> {
    ensure_unlocked(&headers, &state).await?;
    Ok(Json(state.readings.all().to_vec()))
}

/// GET /{id}
#[instrument(skip(state, headers))]
async fn get_reading(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Reading>, ApiError> {
    ensure_unlocked(&headers, &state).await?;
    let reading = state.readings.get(&id).cloned().ok_or(DomainError::NotFound {
        entity: "reading",
        key: id,
    })?;
    Ok(Json(reading))
}

/// Returns the router for the readings library.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_readings))
        .route("/{id}", get(get_reading))
}
