use axum::response::Json;
use serde::Serialize;

use crate::catalog::{ModelDescriptor, MODELS};

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: &'static [ModelDescriptor],
}

/// `GET /api/models`: the static capability table, in table order.
pub async fn handler() -> Json<ModelsResponse> {
    Json(ModelsResponse { models: MODELS })
}
