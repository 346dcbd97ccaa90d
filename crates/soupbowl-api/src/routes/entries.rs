//! Public catalog of published soup entries.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use soupbowl_entry::application::query_handlers::{self, EntrySummary, EntryView};
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /
async fn list_published(State(state): State<AppState>) -> Result<Json<Vec<EntrySummary>>, ApiError> {
    let summaries = query_handlers::list_published_entries(&*state.entry_repository).await?;
    Ok(Json(summaries))
}

/// GET /{slug}
#[instrument(skip(state))]
async fn get_published(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<EntryView>, ApiError> {
    let view = query_handlers::get_published_entry_by_slug(&slug, &*state.entry_repository).await?;
    Ok(Json(view))
}

/// Returns the router for the public catalog.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_published))
        .route("/{slug}", get(get_published))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use soupbowl_entry::domain::aggregates::{Entry, ExampleFields, ExplanationFields};
    use soupbowl_session::domain::aggregates::Session;
    use soupbowl_test_support::{FixedClock, InMemoryRepository};
    use uuid::Uuid;

    use super::*;
    use crate::routes::testing::{request, send, state_with};

    fn entry(slug: &str, publish: bool) -> Entry {
        let clock = FixedClock::at_reference_time();
        let mut entry = Entry::create(
            Uuid::new_v4(),
            format!("Title {slug}"),
            slug.to_owned(),
            None,
            &clock,
        )
        .unwrap();
        entry.update_example(
            ExampleFields {
                description: Some("d".into()),
                starter_code: Some("s".into()),
                tests_code: Some("t".into()),
                simulation_code: Some("sim".into()),
            },
            &clock,
        );
        entry.advance(&clock).unwrap();
        entry
            .update_explanation(
                ExplanationFields {
                    assumption: Some("a".into()),
                    invariant: Some("i".into()),
                    machine_behavior: Some("m".into()),
                },
                &clock,
            )
            .unwrap();
        entry.advance(&clock).unwrap();
        if publish {
            entry.publish(&clock).unwrap();
        }
        entry
    }

    fn app_with(entries: Vec<Entry>) -> Router {
        router().with_state(state_with(
            Arc::new(InMemoryRepository::<Session>::new()),
            Arc::new(InMemoryRepository::with(entries)),
        ))
    }

    #[tokio::test]
    async fn test_list_published_hides_drafts() {
        let app = app_with(vec![entry("live", true), entry("draft", false)]);

        let (status, json) = send(app, request("GET", "/", None)).await;

        assert_eq!(status, StatusCode::OK);
        let summaries = json.as_array().unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0]["slug"], "live");
        assert_eq!(summaries[0]["hasArticle"], false);
    }

    #[tokio::test]
    async fn test_get_published_by_slug() {
        let app = app_with(vec![entry("live", true)]);

        let (status, json) = send(app, request("GET", "/live", None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "PUBLISHED");
        assert_eq!(json["explanationAssumption"], "a");
    }

    #[tokio::test]
    async fn test_get_draft_by_slug_returns_404() {
        let app = app_with(vec![entry("draft", false)]);

        let (status, _) = send(app, request("GET", "/draft", None)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
