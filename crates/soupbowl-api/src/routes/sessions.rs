//! Routes for the Session Lifecycle bounded context.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get, routing::post};
use tracing::{info, instrument};
use uuid::Uuid;

use soupbowl_session::application::command_handlers;
use soupbowl_session::application::query_handlers::{self, SessionView};
use soupbowl_session::domain::commands;

use crate::error::ApiError;
use crate::state::AppState;

/// POST /
#[instrument(skip(state))]
async fn start_session(State(state): State<AppState>) -> Result<Json<SessionView>, ApiError> {
    let command = commands::StartSession {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling start_session command");

    let session = command_handlers::handle_start_session(
        &command,
        state.clock.as_ref(),
        state.ids.as_ref(),
        &*state.session_repository,
    )
    .await?;

    Ok(Json(SessionView::from(&session)))
}

/// GET /{id}
#[instrument(skip(state))]
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let view = query_handlers::get_session_by_id(id, &*state.session_repository).await?;
    Ok(Json(view))
}

/// POST /{id}/advance
#[instrument(skip(state), fields(session_id = %id))]
async fn advance_phase(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let command = commands::AdvancePhase {
        correlation_id: Uuid::new_v4(),
        session_id: id,
    };

    info!(correlation_id = %command.correlation_id, "handling advance_phase command");

    let session = command_handlers::handle_advance_phase(
        &command,
        state.clock.as_ref(),
        &*state.session_repository,
    )
    .await?;

    Ok(Json(SessionView::from(&session)))
}

/// POST /{id}/exit
#[instrument(skip(state), fields(session_id = %id))]
async fn mark_exited(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let command = commands::MarkExited {
        correlation_id: Uuid::new_v4(),
        session_id: id,
    };

    info!(correlation_id = %command.correlation_id, "handling mark_exited command");

    let session = command_handlers::handle_mark_exited(
        &command,
        state.clock.as_ref(),
        &*state.session_repository,
    )
    .await?;

    Ok(Json(SessionView::from(&session)))
}

/// Returns the router for the session context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(start_session))
        .route("/{id}", get(get_session))
        .route("/{id}/advance", post(advance_phase))
        .route("/{id}/exit", post(mark_exited))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use soupbowl_entry::domain::aggregates::Entry;
    use soupbowl_session::domain::aggregates::Session;
    use soupbowl_test_support::{FailingRepository, InMemoryRepository};

    use super::*;
    use crate::routes::testing::{request, send, state_with, test_app_state};

    #[tokio::test]
    async fn test_start_session_returns_session_at_hazard_warning() {
        // Arrange
        let sessions = Arc::new(InMemoryRepository::<Session>::new());
        let app = router().with_state(state_with(
            sessions.clone(),
            Arc::new(InMemoryRepository::<Entry>::new()),
        ));

        // Act
        let (status, json) = send(app, request("POST", "/", None)).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["currentPhase"], "HAZARD_WARNING");
        assert_eq!(json["createdAt"], "2026-01-15T10:00:00Z");
        assert!(json["quitPhase"].is_null());
        let id: Uuid = json["id"].as_str().unwrap().parse().unwrap();
        assert_eq!(sessions.snapshot()[0].id(), id);
    }

    #[tokio::test]
    async fn test_advance_walks_to_readings_then_rejects() {
        // Arrange
        let state = test_app_state();
        let (_, created) = send(router().with_state(state.clone()), request("POST", "/", None)).await;
        let uri = format!("/{}/advance", created["id"].as_str().unwrap());

        // Act
        for _ in 0..4 {
            send(router().with_state(state.clone()), request("POST", &uri, None)).await;
        }
        let (fifth_status, fifth) =
            send(router().with_state(state.clone()), request("POST", &uri, None)).await;
        let (status, json) = send(router().with_state(state), request("POST", &uri, None)).await;

        // Assert
        assert_eq!(fifth_status, StatusCode::OK);
        assert_eq!(fifth["currentPhase"], "READINGS");
        assert!(fifth["forkReachedAt"].is_string());
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "terminal_state");
    }

    #[tokio::test]
    async fn test_exit_records_quit_phase() {
        // Arrange
        let state = test_app_state();
        let (_, created) = send(router().with_state(state.clone()), request("POST", "/", None)).await;
        let id = created["id"].as_str().unwrap();

        // Act
        let (status, json) = send(
            router().with_state(state),
            request("POST", &format!("/{id}/exit"), None),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["currentPhase"], "EXITED");
        assert_eq!(json["quitPhase"], "HAZARD_WARNING");
        assert!(json["exitedAt"].is_string());
    }

    #[tokio::test]
    async fn test_get_unknown_session_returns_404() {
        let app = router().with_state(test_app_state());

        let (status, json) =
            send(app, request("GET", &format!("/{}", Uuid::new_v4()), None)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "not_found");
    }

    #[tokio::test]
    async fn test_advance_unknown_session_returns_404() {
        let app = router().with_state(test_app_state());

        let (status, _) = send(
            app,
            request("POST", &format!("/{}/advance", Uuid::new_v4()), None),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_start_session_returns_500_when_repository_fails() {
        // Arrange
        let app = router().with_state(state_with(
            Arc::new(FailingRepository),
            Arc::new(FailingRepository),
        ));

        // Act
        let (status, json) = send(app, request("POST", "/", None)).await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "infrastructure_error");
    }
}
