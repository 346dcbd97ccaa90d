//! SoupBowl API server entry point.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use soupbowl_api::config::AppConfig;
use soupbowl_api::error::AppError;
use soupbowl_api::routes;
use soupbowl_api::state::AppState;
use soupbowl_core::clock::SystemClock;
use soupbowl_core::id::UuidV4Generator;
use soupbowl_library::{ReadingLibrary, TaskLibrary};
use soupbowl_store::{PgEntryRepository, PgSessionRepository};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting SoupBowl API server");

    let config = AppConfig::from_env()?;
    tracing::info!(?config, "configuration loaded");

    // Create database connection pool and bring the schema up to date.
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    let readings = ReadingLibrary::load(&config.content_dir.join("readings"))?;
    let tasks = TaskLibrary::load(&config.content_dir.join("tasks"))?;

    let app_state = AppState::new(
        Arc::new(SystemClock),
        Arc::new(UuidV4Generator),
        Arc::new(PgSessionRepository::new(pool.clone())),
        Arc::new(PgEntryRepository::new(pool)),
        readings,
        tasks,
        &config.admin_password,
    );

    // TODO: Restrict CORS to the frontend origin via a CORS_ORIGIN setting.
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
