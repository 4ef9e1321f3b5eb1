use crate::catalog::Endpoint;
use crate::error::RelayError;
use crate::protocol::chat::ResponseMessage;
use crate::protocol::gemini::{GeminiImageResponse, GeminiResponse, GeminiUsageMetadata};

pub const DEFAULT_TEXT_REPLY: &str = "Sorry, I couldn't generate a response.";
pub const DEFAULT_IMAGE_FAILURE_REPLY: &str = "Sorry, I couldn't generate an image.";
pub const IMAGE_REPLY: &str = "Here is the generated image.";
pub const GENERATED_IMAGE_MIME_TYPE: &str = "image/png";

/// A normalized reply plus whatever usage the provider reported.
#[derive(Debug, Clone)]
pub struct DecodedReply {
    pub message: ResponseMessage,
    pub usage: Option<GeminiUsageMetadata>,
}

/// Decode a successful provider body according to the model's endpoint.
///
/// # Errors
///
/// Returns [`RelayError::Translation`] when the body is not valid JSON of the
/// expected overall shape. Missing candidates or images are not errors; they
/// produce the default reply text.
pub fn decode_response(endpoint: Endpoint, body: &[u8]) -> Result<DecodedReply, RelayError> {
    match endpoint {
        Endpoint::GenerateImage => {
            let response: GeminiImageResponse = parse_body(body)?;
            Ok(DecodedReply {
                message: decode_image_response(response),
                usage: None,
            })
        }
        Endpoint::GenerateContent => {
            let response: GeminiResponse = parse_body(body)?;
            let usage = response.usage_metadata.clone();
            Ok(DecodedReply {
                message: decode_content_response(response),
                usage,
            })
        }
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, RelayError> {
    serde_json::from_slice(body)
        .map_err(|err| RelayError::Translation(format!("Invalid Gemini response body: {err}")))
}

#[must_use]
pub fn decode_image_response(response: GeminiImageResponse) -> ResponseMessage {
    let image = response
        .images
        .into_iter()
        .next()
        .and_then(|image| image.data)
        .filter(|data| !data.is_empty());

    match image {
        Some(data) => {
            ResponseMessage::assistant_text(IMAGE_REPLY).with_image(data, GENERATED_IMAGE_MIME_TYPE)
        }
        None => ResponseMessage::assistant_text(DEFAULT_IMAGE_FAILURE_REPLY),
    }
}

/// Join the text parts of the first candidate and surface its first inline
/// image, if any.
#[must_use]
pub fn decode_content_response(response: GeminiResponse) -> ResponseMessage {
    let parts = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .unwrap_or_default();

    let mut text = String::new();
    let mut image = None;
    for part in parts {
        if let Some(chunk) = part.text {
            text.push_str(&chunk);
        }
        if image.is_none() {
            image = part.inline_data.filter(|blob| !blob.data.is_empty());
        }
    }

    let content = if text.trim().is_empty() {
        DEFAULT_TEXT_REPLY.to_string()
    } else {
        text
    };
    let message = ResponseMessage::assistant_text(content);
    match image {
        Some(blob) => message.with_image(blob.data, blob.mime_type),
        None => message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::chat::ChatRole;
    use serde_json::json;

    fn decode(endpoint: Endpoint, body: serde_json::Value) -> DecodedReply {
        decode_response(endpoint, &serde_json::to_vec(&body).unwrap()).unwrap()
    }

    #[test]
    fn test_content_text_is_joined() {
        let reply = decode(
            Endpoint::GenerateContent,
            json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "Hello, "}, {"text": "world"}]},
                    "finishReason": "STOP"
                }],
                "usageMetadata": {"promptTokenCount": 3, "candidatesTokenCount": 2, "totalTokenCount": 5}
            }),
        );
        assert_eq!(reply.message.role, ChatRole::Assistant);
        assert_eq!(reply.message.content, "Hello, world");
        assert!(reply.message.image.is_none());
        assert_eq!(reply.usage.unwrap().total_token_count, Some(5));
    }

    #[test]
    fn test_content_without_candidates_falls_back() {
        let reply = decode(Endpoint::GenerateContent, json!({"promptFeedback": {}}));
        assert_eq!(reply.message.content, DEFAULT_TEXT_REPLY);
    }

    #[test]
    fn test_content_ignores_unknown_part_keys() {
        let reply = decode(
            Endpoint::GenerateContent,
            json!({"candidates": [{"content": {"parts": [
                {"text": "ok", "thoughtSignature": "abc"}
            ]}}]}),
        );
        assert_eq!(reply.message.content, "ok");
    }

    #[test]
    fn test_content_surfaces_inline_image() {
        let reply = decode(
            Endpoint::GenerateContent,
            json!({"candidates": [{"content": {"parts": [
                {"text": "Here you go"},
                {"inlineData": {"mimeType": "image/jpeg", "data": "/9j/"}}
            ]}}]}),
        );
        assert_eq!(reply.message.content, "Here you go");
        assert_eq!(reply.message.image.as_deref(), Some("/9j/"));
        assert_eq!(reply.message.mime_type.as_deref(), Some("image/jpeg"));
    }

    #[test]
    fn test_image_response_is_png() {
        let reply = decode(Endpoint::GenerateImage, json!({"images": [{"data": "iVBORw0K"}]}));
        assert_eq!(reply.message.content, IMAGE_REPLY);
        assert_eq!(reply.message.image.as_deref(), Some("iVBORw0K"));
        assert_eq!(reply.message.mime_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn test_image_response_without_images_falls_back() {
        let reply = decode(Endpoint::GenerateImage, json!({"images": []}));
        assert_eq!(reply.message.content, DEFAULT_IMAGE_FAILURE_REPLY);
        assert!(reply.message.image.is_none());
        assert!(reply.message.mime_type.is_none());
    }

    #[test]
    fn test_non_json_body_is_translation_error() {
        let err = decode_response(Endpoint::GenerateContent, b"<html>").unwrap_err();
        assert!(matches!(err, RelayError::Translation(_)));
    }
}
