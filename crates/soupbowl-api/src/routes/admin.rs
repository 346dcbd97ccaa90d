//! Admin dashboard routes.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use soupbowl_session::application::query_handlers;
use soupbowl_session::domain::metrics::SessionMetrics;
use tracing::instrument;

use crate::auth::AdminAuth;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /metrics
#[instrument(skip_all)]
async fn get_metrics(
    _admin: AdminAuth,
    State(state): State<AppState>,
) -> Result<Json<SessionMetrics>, ApiError> {
    let metrics = query_handlers::get_session_metrics(&*state.session_repository).await?;
    Ok(Json(metrics))
}

/// Returns the router for the admin dashboard.
pub fn router() -> Router<AppState> {
    Router::new().route("/metrics", get(get_metrics))
}
