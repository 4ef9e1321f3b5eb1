use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;

use crate::error::RelayError;
use crate::protocol::chat::{Attachment, ChatMessage};

/// Decoded `/api/chat` multipart form.
#[derive(Debug, Clone)]
pub struct ChatForm {
    /// Kept verbatim. Empty when the field is missing; the catalog lookup rejects it.
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub file: Option<Attachment>,
}

impl ChatForm {
    /// Content of the last history entry, the only one forwarded upstream.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Internal`] when the history is empty.
    pub fn prompt(&self) -> Result<&str, RelayError> {
        self.messages
            .last()
            .map(|message| message.content.as_str())
            .ok_or_else(|| RelayError::Internal("messages must contain at least one entry".into()))
    }
}

/// Read the `model`, `messages` and `file` fields. Unknown fields are skipped.
///
/// # Errors
///
/// Returns [`RelayError::PayloadTooLarge`] when the body limit is hit and
/// [`RelayError::Internal`] for any other malformed form or history.
pub async fn parse_chat_form(mut multipart: Multipart) -> Result<ChatForm, RelayError> {
    let mut model = None;
    let mut messages_json = None;
    let mut file = None;

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "model" => model = Some(field.text().await.map_err(form_error)?),
            "messages" => messages_json = Some(field.text().await.map_err(form_error)?),
            "file" => {
                let has_file_name = field.file_name().is_some_and(|n| !n.is_empty());
                let mime_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(form_error)?;
                // Browsers submit an empty, unnamed part when no file was picked.
                if !data.is_empty() || has_file_name {
                    file = Some(Attachment::new(mime_type.as_deref(), data));
                }
            }
            other => tracing::debug!(field = other, "ignoring unknown form field"),
        }
    }

    let messages_json = messages_json
        .ok_or_else(|| RelayError::Internal("missing form field 'messages'".into()))?;
    let messages: Vec<ChatMessage> = serde_json::from_str(&messages_json)
        .map_err(|err| RelayError::Internal(format!("Invalid messages JSON: {err}")))?;

    Ok(ChatForm {
        model: model.unwrap_or_default(),
        messages,
        file,
    })
}

fn form_error(err: MultipartError) -> RelayError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        RelayError::PayloadTooLarge(err.body_text())
    } else {
        RelayError::Internal(format!("Invalid form body: {}", err.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::chat::ChatRole;

    fn form(messages: Vec<ChatMessage>) -> ChatForm {
        ChatForm {
            model: "gemini-2.0-flash".to_string(),
            messages,
            file: None,
        }
    }

    #[test]
    fn test_prompt_uses_last_message_only() {
        let form = form(vec![
            ChatMessage {
                role: ChatRole::User,
                content: "first".into(),
            },
            ChatMessage {
                role: ChatRole::Assistant,
                content: "reply".into(),
            },
            ChatMessage {
                role: ChatRole::User,
                content: "latest".into(),
            },
        ]);
        assert_eq!(form.prompt().unwrap(), "latest");
    }

    #[test]
    fn test_empty_history_is_error() {
        let err = form(Vec::new()).prompt().unwrap_err();
        assert!(matches!(err, RelayError::Internal(_)));
    }
}
