pub(crate) mod form;

use std::sync::Arc;
use std::time::Instant;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Json, Response};
use tracing::Instrument;

use crate::catalog::find_model;
use crate::error::{ErrorCategory, RelayError};
use crate::observability::log_request_complete;
use crate::protocol::chat::ChatResponse;
use crate::protocol::gemini::encoder::encode_request;
use crate::protocol::gemini::response_decoder::decode_response;
use crate::state::AppState;
use crate::transport::{build_upstream_url, redacted_url};

use self::form::parse_chat_form;

const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to get response from Gemini API";
const MAX_LOGGED_ERROR_BODY_BYTES: usize = 2048;

/// `POST /api/chat`.
pub async fn handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let span = tracing::info_span!("chat", request_id = %state.next_request_id());
    async move {
        match handle_chat(&state, multipart).await {
            Ok(reply) => Json(reply).into_response(),
            Err(err) => {
                if err.category() == ErrorCategory::InvalidRequest {
                    tracing::warn!(error = %err, "chat request rejected");
                } else {
                    tracing::error!(error = %err, "chat request failed");
                }
                err.into_response()
            }
        }
    }
    .instrument(span)
    .await
}

async fn handle_chat(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ChatResponse, RelayError> {
    let start = Instant::now();
    let api_key = state.api_key()?;

    let multipart = multipart.map_err(|rejection| {
        RelayError::Internal(format!("Invalid form body: {}", rejection.body_text()))
    })?;
    let form = parse_chat_form(multipart).await?;

    let model = find_model(&form.model)
        .ok_or_else(|| RelayError::InvalidRequest(format!("Unknown model: '{}'", form.model)))?;
    let prompt = form.prompt()?;

    let body = encode_request(model, prompt, form.file.as_ref()).to_json_bytes()?;
    let url = build_upstream_url(&state.config.gemini.base_url, model, api_key)?;
    tracing::debug!(
        model = model.id,
        url = %redacted_url(&url),
        has_file = form.file.is_some(),
        "sending Gemini request"
    );

    let reply = state.transport.post_json(&url, body).await?;
    if !reply.status.is_success() {
        tracing::error!(
            status = reply.status.as_u16(),
            status_text = reply.status.canonical_reason().unwrap_or(""),
            model = model.id,
            error = %error_body_excerpt(&reply.body),
            "Gemini API error"
        );
        return Err(RelayError::Upstream {
            status: reply.status.as_u16(),
            message: UPSTREAM_FAILURE_MESSAGE.to_string(),
        });
    }

    let decoded = decode_response(model.endpoint, &reply.body)?;
    log_request_complete(model.id, model.endpoint, decoded.usage.as_ref(), start);
    Ok(ChatResponse::single(decoded.message))
}

/// Provider error body for logging, cut to [`MAX_LOGGED_ERROR_BODY_BYTES`].
fn error_body_excerpt(body: &[u8]) -> String {
    if body.len() <= MAX_LOGGED_ERROR_BODY_BYTES {
        return String::from_utf8_lossy(body).into_owned();
    }
    let head = String::from_utf8_lossy(&body[..MAX_LOGGED_ERROR_BODY_BYTES]);
    format!(
        "{}... ({} bytes truncated)",
        head.trim_end_matches('\u{FFFD}'),
        body.len() - MAX_LOGGED_ERROR_BODY_BYTES
    )
}
