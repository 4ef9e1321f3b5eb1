use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};

use crate::catalog::MODELS;
use crate::state::AppState;

/// Health check handler.
/// Returns JSON with status and config summary. Never includes the key itself.
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    let config = &state.config;
    Json(json!({
        "status": "gemini-chat-rs is running",
        "models_count": MODELS.len(),
        "credential_configured": state.has_api_key(),
        "config": {
            "log_level": config.features.log_level,
            "api_key_env": config.gemini.api_key_env,
        }
    }))
}
