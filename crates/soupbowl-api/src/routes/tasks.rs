//! Routes for the public task library.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use soupbowl_core::error::DomainError;
use soupbowl_library::Task;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /
async fn list_tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
    Json(state.tasks.all().to_vec())
}

/// GET /{id}
async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let task = state.tasks.get(&id).cloned().ok_or(DomainError::NotFound {
        entity: "task",
        key: id,
    })?;
    Ok(Json(task))
}

/// Returns the router for the task library.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tasks))
        .route("/{id}", get(get_task))
}
