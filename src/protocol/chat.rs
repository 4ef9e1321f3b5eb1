use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Chat message role as sent by the browser client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    #[serde(other)]
    Other,
}

/// One entry of the caller-supplied history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    #[serde(default)]
    pub content: String,
}

/// A file uploaded alongside the chat turn.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub mime_type: String,
    pub data: Bytes,
}

pub const DEFAULT_ATTACHMENT_MIME_TYPE: &str = "application/octet-stream";

impl Attachment {
    #[must_use]
    pub fn new(mime_type: Option<&str>, data: Bytes) -> Self {
        let mime_type = mime_type
            .map(str::trim)
            .filter(|mime| !mime.is_empty())
            .unwrap_or(DEFAULT_ATTACHMENT_MIME_TYPE)
            .to_string();
        Self { mime_type, data }
    }

    /// Standard (padded) base64 of the raw bytes.
    #[must_use]
    pub fn base64_data(&self) -> String {
        BASE64_STANDARD.encode(&self.data)
    }
}

/// A reply message in the shape the chat widget renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMessage {
    pub role: ChatRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl ResponseMessage {
    #[must_use]
    pub fn assistant_text(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            image: None,
            mime_type: None,
        }
    }

    #[must_use]
    pub fn with_image(mut self, image: String, mime_type: impl Into<String>) -> Self {
        self.image = Some(image);
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Body of a successful `/api/chat` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub messages: Vec<ResponseMessage>,
}

impl ChatResponse {
    #[must_use]
    pub fn single(message: ResponseMessage) -> Self {
        Self {
            messages: vec![message],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attachment_defaults_mime_type() {
        let attachment = Attachment::new(None, Bytes::from_static(b"abc"));
        assert_eq!(attachment.mime_type, DEFAULT_ATTACHMENT_MIME_TYPE);
        let attachment = Attachment::new(Some("  "), Bytes::from_static(b"abc"));
        assert_eq!(attachment.mime_type, DEFAULT_ATTACHMENT_MIME_TYPE);
        let attachment = Attachment::new(Some("image/jpeg"), Bytes::from_static(b"abc"));
        assert_eq!(attachment.mime_type, "image/jpeg");
    }

    #[test]
    fn test_attachment_base64_is_standard_padded() {
        let attachment = Attachment::new(Some("image/png"), Bytes::from_static(&[0xff, 0x00]));
        assert_eq!(attachment.base64_data(), "/wA=");
    }

    #[test]
    fn test_history_accepts_unknown_roles() {
        let messages: Vec<ChatMessage> = serde_json::from_value(json!([
            {"role": "system", "content": "be brief"},
            {"role": "user", "content": "hi"}
        ]))
        .unwrap();
        assert_eq!(messages[0].role, ChatRole::Other);
        assert_eq!(messages[1].role, ChatRole::User);
    }

    #[test]
    fn test_response_message_omits_absent_image() {
        let text = serde_json::to_value(ChatResponse::single(ResponseMessage::assistant_text(
            "hello",
        )))
        .unwrap();
        assert_eq!(
            text,
            json!({"messages": [{"role": "assistant", "content": "hello"}]})
        );

        let image = serde_json::to_value(ResponseMessage::assistant_text("pic").with_image(
            "aGk=".to_string(),
            "image/png",
        ))
        .unwrap();
        assert_eq!(image["image"], "aGk=");
        assert_eq!(image["mimeType"], "image/png");
    }
}
