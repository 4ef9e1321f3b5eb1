use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::api::{chat, health, models};
use crate::state::AppState;

/// Build the application router, mounted under the configured base path.
///
/// Under a base path the health route answers both `{base}` and `{base}/`.
/// Wrong methods on known paths yield 405; unknown paths 404.
pub fn build_router(state: Arc<AppState>) -> Router {
    let base_path = normalize_base_path(&state.config.server.base_path);
    let max_body_bytes = state.config.server.max_body_bytes;

    let routes = Router::new()
        .route("/", get(health::health_handler))
        .route("/api/models", get(models::handler))
        .route("/api/chat", post(chat::handler));

    let router = if base_path.is_empty() {
        routes
    } else {
        Router::new()
            .route(&format!("{base_path}/"), get(health::health_handler))
            .nest(&base_path, routes)
    };

    router
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

#[must_use]
pub fn normalize_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim();
    if trimmed.is_empty() || trimmed == "/" {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.trim_end_matches('/').to_string()
    } else {
        format!("/{}", trimmed.trim_end_matches('/'))
    }
}
