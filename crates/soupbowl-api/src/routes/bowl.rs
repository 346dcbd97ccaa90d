//! Admin routes for the Entry Authoring bounded context.
//!
//! Every route requires the `X-Admin-Password` header.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post, routing::put};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use soupbowl_entry::application::command_handlers;
use soupbowl_entry::application::query_handlers::{self, EntryView};
use soupbowl_entry::domain::aggregates::{ExampleFields, ExplanationFields};
use soupbowl_entry::domain::commands;

use crate::auth::AdminAuth;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /entries. Missing title or slug are rejected as
/// blank by the domain.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for PUT /entries/{id}/example.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateExampleRequest {
    pub description: Option<String>,
    pub starter_code: Option<String>,
    pub tests_code: Option<String>,
    pub simulation_code: Option<String>,
}

impl From<UpdateExampleRequest> for ExampleFields {
    fn from(request: UpdateExampleRequest) -> Self {
        Self {
            description: request.description,
            starter_code: request.starter_code,
            tests_code: request.tests_code,
            simulation_code: request.simulation_code,
        }
    }
}

/// Request body for PUT /entries/{id}/explanation.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateExplanationRequest {
    pub assumption: Option<String>,
    pub invariant: Option<String>,
    pub machine_behavior: Option<String>,
}

impl From<UpdateExplanationRequest> for ExplanationFields {
    fn from(request: UpdateExplanationRequest) -> Self {
        Self {
            assumption: request.assumption,
            invariant: request.invariant,
            machine_behavior: request.machine_behavior,
        }
    }
}

/// Request body for PUT /entries/{id}/article.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateArticleRequest {
    pub article_content: Option<String>,
}

/// GET /entries
async fn list_entries(
    _admin: AdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<EntryView>>, ApiError> {
    let views = query_handlers::list_entries(&*state.entry_repository).await?;
    Ok(Json(views))
}

/// POST /entries
#[instrument(skip(state, request), fields(slug = %request.slug))]
async fn create_entry(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Json(request): Json<CreateEntryRequest>,
) -> Result<Json<EntryView>, ApiError> {
    let command = commands::CreateEntry {
        correlation_id: Uuid::new_v4(),
        title: request.title,
        slug: request.slug,
        description: request.description,
    };

    info!(correlation_id = %command.correlation_id, "handling create_entry command");

    let entry = command_handlers::handle_create_entry(
        &command,
        state.clock.as_ref(),
        state.ids.as_ref(),
        &*state.entry_repository,
    )
    .await?;

    Ok(Json(EntryView::from(&entry)))
}

/// GET /entries/{id}
async fn get_entry(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EntryView>, ApiError> {
    let view = query_handlers::get_entry_by_id(id, &*state.entry_repository).await?;
    Ok(Json(view))
}

/// DELETE /entries/{id}
#[instrument(skip(state), fields(entry_id = %id))]
async fn delete_entry(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let command = commands::DeleteEntry {
        correlation_id: Uuid::new_v4(),
        entry_id: id,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_entry command");

    command_handlers::handle_delete_entry(&command, &*state.entry_repository).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /entries/{id}/example
#[instrument(skip(state, request), fields(entry_id = %id))]
async fn update_example(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateExampleRequest>,
) -> Result<Json<EntryView>, ApiError> {
    let command = commands::UpdateExample {
        correlation_id: Uuid::new_v4(),
        entry_id: id,
        fields: request.into(),
    };

    info!(correlation_id = %command.correlation_id, "handling update_example command");

    let entry = command_handlers::handle_update_example(
        &command,
        state.clock.as_ref(),
        &*state.entry_repository,
    )
    .await?;

    Ok(Json(EntryView::from(&entry)))
}

/// PUT /entries/{id}/explanation
#[instrument(skip(state, request), fields(entry_id = %id))]
async fn update_explanation(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateExplanationRequest>,
) -> Result<Json<EntryView>, ApiError> {
    let command = commands::UpdateExplanation {
        correlation_id: Uuid::new_v4(),
        entry_id: id,
        fields: request.into(),
    };

    info!(correlation_id = %command.correlation_id, "handling update_explanation command");

    let entry = command_handlers::handle_update_explanation(
        &command,
        state.clock.as_ref(),
        &*state.entry_repository,
    )
    .await?;

    Ok(Json(EntryView::from(&entry)))
}

/// PUT /entries/{id}/article
#[instrument(skip(state, request), fields(entry_id = %id))]
async fn update_article(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateArticleRequest>,
) -> Result<Json<EntryView>, ApiError> {
    let command = commands::UpdateArticle {
        correlation_id: Uuid::new_v4(),
        entry_id: id,
        article_content: request.article_content,
    };

    info!(correlation_id = %command.correlation_id, "handling update_article command");

    let entry = command_handlers::handle_update_article(
        &command,
        state.clock.as_ref(),
        &*state.entry_repository,
    )
    .await?;

    Ok(Json(EntryView::from(&entry)))
}

/// POST /entries/{id}/advance
#[instrument(skip(state), fields(entry_id = %id))]
async fn advance_entry(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EntryView>, ApiError> {
    let command = commands::AdvanceEntry {
        correlation_id: Uuid::new_v4(),
        entry_id: id,
    };

    info!(correlation_id = %command.correlation_id, "handling advance_entry command");

    let entry = command_handlers::handle_advance_entry(
        &command,
        state.clock.as_ref(),
        &*state.entry_repository,
    )
    .await?;

    Ok(Json(EntryView::from(&entry)))
}

/// POST /entries/{id}/publish
#[instrument(skip(state), fields(entry_id = %id))]
async fn publish_entry(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EntryView>, ApiError> {
    let command = commands::PublishEntry {
        correlation_id: Uuid::new_v4(),
        entry_id: id,
    };

    info!(correlation_id = %command.correlation_id, "handling publish_entry command");

    let entry = command_handlers::handle_publish_entry(
        &command,
        state.clock.as_ref(),
        &*state.entry_repository,
    )
    .await?;

    Ok(Json(EntryView::from(&entry)))
}

/// POST /entries/{id}/unpublish
#[instrument(skip(state), fields(entry_id = %id))]
async fn unpublish_entry(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EntryView>, ApiError> {
    let command = commands::UnpublishEntry {
        correlation_id: Uuid::new_v4(),
        entry_id: id,
    };

    info!(correlation_id = %command.correlation_id, "handling unpublish_entry command");

    let entry = command_handlers::handle_unpublish_entry(
        &command,
        state.clock.as_ref(),
        &*state.entry_repository,
    )
    .await?;

    Ok(Json(EntryView::from(&entry)))
}

/// Returns the router for the admin authoring surface.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/entries", get(list_entries).post(create_entry))
        .route("/entries/{id}", get(get_entry).delete(delete_entry))
        .route("/entries/{id}/example", put(update_example))
        .route("/entries/{id}/explanation", put(update_explanation))
        .route("/entries/{id}/article", put(update_article))
        .route("/entries/{id}/advance", post(advance_entry))
        .route("/entries/{id}/publish", post(publish_entry))
        .route("/entries/{id}/unpublish", post(unpublish_entry))
}
