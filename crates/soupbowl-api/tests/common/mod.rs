//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use soupbowl_core::id::UuidV4Generator;
use soupbowl_library::{Reading, ReadingLibrary, TaskLibrary};
use soupbowl_store::{PgEntryRepository, PgSessionRepository};
use soupbowl_test_support::FixedClock;
use sqlx::PgPool;
use tower::ServiceExt;

use soupbowl_api::routes;
use soupbowl_api::state::AppState;

pub const ADMIN_PASSWORD: &str = "integration-secret";

/// Fixed timestamp used across all integration tests.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}

/// Parses a timestamp field from a response body.
pub fn timestamp(value: &serde_json::Value) -> DateTime<Utc> {
    value.as_str().unwrap().parse().unwrap()
}

/// Build the full app router with real Postgres repositories and a fixed
/// clock. Uses the same route structure as `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    let app_state = AppState::new(
        Arc::new(FixedClock(fixed_now())),
        Arc::new(UuidV4Generator),
        Arc::new(PgSessionRepository::new(pool.clone())),
        Arc::new(PgEntryRepository::new(pool)),
        ReadingLibrary::from_readings(vec![Reading {
            id: "01-memory-models".to_owned(),
            title: "Memory Models".to_owned(),
            summary: "Why reads lie".to_owned(),
            markdown_content: "# Memory".to_owned(),
            category: "concurrency".to_owned(),
        }]),
        TaskLibrary::default(),
        ADMIN_PASSWORD,
    );

    routes::router().with_state(app_state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

fn builder(method: &str, uri: &str, headers: &[(&str, &str)]) -> axum::http::request::Builder {
    headers
        .iter()
        .fold(Request::builder().method(method).uri(uri), |b, (k, v)| {
            b.header(*k, *v)
        })
}

/// Send a request without a body and return the response.
pub async fn send_empty(
    app: Router,
    method: &str,
    uri: &str,
    headers: &[(&str, &str)],
) -> (StatusCode, serde_json::Value) {
    let request = builder(method, uri, headers).body(Body::empty()).unwrap();
    send(app, request).await
}

/// Send a request with a JSON body and return the response.
pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    headers: &[(&str, &str)],
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = builder(method, uri, headers)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send_empty(app, "GET", uri, &[]).await
}

/// Headers authorizing an admin request.
pub fn admin() -> [(&'static str, &'static str); 1] {
    [("x-admin-password", ADMIN_PASSWORD)]
}
