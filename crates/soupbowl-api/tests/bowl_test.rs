//! Integration tests for the Entry Authoring context, the public catalog and
//! the admin metrics.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

async fn admin_json(
    pool: &PgPool,
    method: &str,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let app = common::build_test_app(pool.clone());
    common::send_json(app, method, uri, &common::admin(), body).await
}

async fn admin_empty(pool: &PgPool, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
    let app = common::build_test_app(pool.clone());
    common::send_empty(app, method, uri, &common::admin()).await
}

async fn create_entry(pool: &PgPool, slug: &str) -> String {
    let (status, json) = admin_json(
        pool,
        "POST",
        "/api/bowl/entries",
        &json!({ "title": "Lost Update", "slug": slug, "description": "Two writers" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["id"].as_str().unwrap().to_owned()
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_entry_authoring_to_public_catalog(pool: PgPool) {
    // Arrange
    let id = create_entry(&pool, "lost-update").await;
    let base = format!("/api/bowl/entries/{id}");

    // Act
    admin_json(
        &pool,
        "PUT",
        &format!("{base}/example"),
        &json!({
            "description": "shared counter",
            "starterCode": "let c = 0;",
            "testsCode": "assert(c === 2);",
            "simulationCode": "interleave();"
        }),
    )
    .await;
    admin_empty(&pool, "POST", &format!("{base}/advance")).await;
    admin_json(
        &pool,
        "PUT",
        &format!("{base}/explanation"),
        &json!({
            "assumption": "increments are atomic",
            "invariant": "c counts increments",
            "machineBehavior": "read-modify-write interleaves"
        }),
    )
    .await;
    admin_empty(&pool, "POST", &format!("{base}/advance")).await;
    let (status, published) = admin_empty(&pool, "POST", &format!("{base}/publish")).await;

    let app = common::build_test_app(pool.clone());
    let (_, catalog) = common::get_json(app, "/api/entries").await;
    let app = common::build_test_app(pool);
    let (detail_status, detail) = common::get_json(app, "/api/entries/lost-update").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(published["status"], "PUBLISHED");
    assert_eq!(common::timestamp(&published["publishedAt"]), common::fixed_now());
    let summaries = catalog.as_array().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0]["slug"], "lost-update");
    assert_eq!(summaries[0]["description"], "Two writers");
    assert_eq!(summaries[0]["hasArticle"], false);
    assert_eq!(detail_status, StatusCode::OK);
    assert_eq!(detail["explanationMachineBehavior"], "read-modify-write interleaves");
    assert_eq!(detail["exampleStarterCode"], "let c = 0;");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_overlong_title_is_rejected_before_the_database(pool: PgPool) {
    let (status, json) = admin_json(
        &pool,
        "POST",
        "/api/bowl/entries",
        &json!({ "title": "t".repeat(256), "slug": "long" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_duplicate_slug_returns_409(pool: PgPool) {
    create_entry(&pool, "x").await;

    let (status, json) = admin_json(
        &pool,
        "POST",
        "/api/bowl/entries",
        &json!({ "title": "Again", "slug": "x" }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "duplicate_slug");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_draft_is_not_in_public_catalog(pool: PgPool) {
    create_entry(&pool, "draft").await;

    let app = common::build_test_app(pool.clone());
    let (_, catalog) = common::get_json(app, "/api/entries").await;
    let app = common::build_test_app(pool);
    let (status, _) = common::get_json(app, "/api/entries/draft").await;

    assert!(catalog.as_array().unwrap().is_empty());
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_draft_entry(pool: PgPool) {
    let id = create_entry(&pool, "x").await;

    let (status, _) = admin_empty(&pool, "DELETE", &format!("/api/bowl/entries/{id}")).await;
    let (after, _) = admin_empty(&pool, "GET", &format!("/api/bowl/entries/{id}")).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(after, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_admin_routes_reject_missing_password(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (entries, _) = common::get_json(app, "/api/bowl/entries").await;
    let app = common::build_test_app(pool);
    let (metrics, _) = common::get_json(app, "/api/admin/metrics").await;

    assert_eq!(entries, StatusCode::UNAUTHORIZED);
    assert_eq!(metrics, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_metrics_count_persisted_sessions(pool: PgPool) {
    // Arrange
    for _ in 0..2 {
        let app = common::build_test_app(pool.clone());
        common::send_empty(app, "POST", "/api/sessions", &[]).await;
    }

    // Act
    let (status, json) = admin_empty(&pool, "GET", "/api/admin/metrics").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["totalSessions"], 2);
    assert_eq!(json["sessionsByPhase"]["HAZARD_WARNING"], 2);
    assert_eq!(json["completedToFork"], 0);
    assert_eq!(json["totalExited"], 0);
    assert!(json["quitDistribution"].as_object().unwrap().is_empty());
}
