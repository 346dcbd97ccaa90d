//! Route modules organized by bounded context.

use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod bowl;
pub mod entries;
pub mod health;
pub mod readings;
pub mod sessions;
pub mod tasks;

#[cfg(test)]
pub(crate) mod testing;

/// Returns the full application router, without middleware layers.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api/sessions", sessions::router())
        .nest("/api/readings", readings::router())
        .nest("/api/tasks", tasks::router())
        .nest("/api/entries", entries::router())
        .nest("/api/bowl", bowl::router())
        .nest("/api/admin", admin::router())
}
