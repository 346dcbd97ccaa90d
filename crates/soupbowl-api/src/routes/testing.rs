//! Helpers for router unit tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use soupbowl_core::id::UuidV4Generator;
use soupbowl_core::repository::Repository;
use soupbowl_entry::domain::aggregates::Entry;
use soupbowl_library::{Reading, ReadingLibrary, Task, TaskLibrary};
use soupbowl_session::domain::aggregates::Session;
use soupbowl_test_support::{FixedClock, InMemoryRepository};
use tower::ServiceExt;

use crate::auth::ADMIN_PASSWORD_HEADER;
use crate::state::AppState;

pub(crate) const ADMIN_PASSWORD: &str = "letmein";

pub(crate) fn state_with(
    session_repository: Arc<dyn Repository<Session>>,
    entry_repository: Arc<dyn Repository<Entry>>,
) -> AppState {
    AppState::new(
        Arc::new(FixedClock::at_reference_time()),
        Arc::new(UuidV4Generator),
        session_repository,
        entry_repository,
        ReadingLibrary::from_readings(vec![Reading {
            id: "memory-models".to_owned(),
            title: "Memory Models".to_owned(),
            summary: "Why reads lie".to_owned(),
            markdown_content: "# Memory".to_owned(),
            category: "concurrency".to_owned(),
        }]),
        TaskLibrary::from_tasks(vec![Task {
            id: "counter".to_owned(),
            title: "Counter".to_owned(),
            description: "Increment twice.".to_owned(),
            starter_code: "count++;".to_owned(),
        }]),
        ADMIN_PASSWORD,
    )
}

pub(crate) fn test_app_state() -> AppState {
    state_with(
        Arc::new(InMemoryRepository::<Session>::new()),
        Arc::new(InMemoryRepository::<Entry>::new()),
    )
}

pub(crate) fn request(method: &str, uri: &str, body: Option<&Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub(crate) fn admin_request(method: &str, uri: &str, body: Option<&Value>) -> Request<Body> {
    let mut admin = request(method, uri, body);
    admin
        .headers_mut()
        .insert(ADMIN_PASSWORD_HEADER, ADMIN_PASSWORD.parse().unwrap());
    admin
}

/// Sends one request and decodes the body as JSON (`Null` when empty).
pub(crate) async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };
    (status, json)
}
