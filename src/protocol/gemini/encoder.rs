use bytes::Bytes;

use crate::catalog::{Endpoint, Modality, ModelDescriptor};
use crate::error::RelayError;
use crate::protocol::chat::Attachment;
use crate::protocol::gemini::{
    GeminiBlob, GeminiContent, GeminiFileData, GeminiGenerationConfig, GeminiImageInput,
    GeminiImagePrompt, GeminiImageRequest, GeminiPart, GeminiRequest,
};

/// Outbound body, shaped by the model's endpoint.
#[derive(Debug, Clone)]
pub enum UpstreamPayload {
    Content(GeminiRequest),
    Image(GeminiImageRequest),
}

impl UpstreamPayload {
    /// Serialize the payload to JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Internal`] if serialization fails.
    pub fn to_json_bytes(&self) -> Result<Bytes, RelayError> {
        let encoded = match self {
            UpstreamPayload::Content(request) => serde_json::to_vec(request),
            UpstreamPayload::Image(request) => serde_json::to_vec(request),
        };
        encoded
            .map(Bytes::from)
            .map_err(|err| RelayError::Internal(format!("Failed to encode Gemini request: {err}")))
    }
}

/// Build the outbound payload for `model` from the prompt and optional file.
#[must_use]
pub fn encode_request(
    model: &ModelDescriptor,
    prompt: &str,
    attachment: Option<&Attachment>,
) -> UpstreamPayload {
    match model.endpoint {
        Endpoint::GenerateImage => UpstreamPayload::Image(encode_image_request(prompt, attachment)),
        Endpoint::GenerateContent => {
            UpstreamPayload::Content(encode_content_request(model, prompt, attachment))
        }
    }
}

#[must_use]
pub fn encode_image_request(prompt: &str, attachment: Option<&Attachment>) -> GeminiImageRequest {
    GeminiImageRequest {
        prompt: GeminiImagePrompt {
            text: prompt.to_string(),
            image: attachment.map(|file| GeminiImageInput {
                inline_data: inline_blob(file),
            }),
        },
    }
}

/// Build a single user content block.
///
/// Analysis-capable models receive the file as `inlineData`. Generation-capable
/// models receive it as a `fileData` reference whose URI carries the base64
/// bytes; this asymmetry is kept as-is.
#[must_use]
pub fn encode_content_request(
    model: &ModelDescriptor,
    prompt: &str,
    attachment: Option<&Attachment>,
) -> GeminiRequest {
    let mut parts = Vec::with_capacity(2);
    parts.push(GeminiPart::Text(prompt.to_string()));

    let generates_images = model.supports(Modality::ImageGeneration);
    if let Some(file) = attachment {
        if model.supports(Modality::ImageAnalysis) {
            parts.push(GeminiPart::InlineData(inline_blob(file)));
        } else if generates_images {
            parts.push(GeminiPart::FileData(GeminiFileData {
                mime_type: file.mime_type.clone(),
                file_uri: file.base64_data(),
            }));
        } else {
            tracing::warn!(
                model = model.id,
                mime_type = %file.mime_type,
                "attachment dropped: model accepts no file input"
            );
        }
    }

    let generation_config = generates_images.then(|| GeminiGenerationConfig {
        response_modalities: Some(vec!["TEXT".to_string(), "IMAGE".to_string()]),
    });

    GeminiRequest {
        contents: vec![GeminiContent {
            role: Some("user".to_string()),
            parts,
        }],
        generation_config,
    }
}

fn inline_blob(file: &Attachment) -> GeminiBlob {
    GeminiBlob {
        mime_type: file.mime_type.clone(),
        data: file.base64_data(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_model;
    use serde_json::json;

    fn png() -> Attachment {
        Attachment::new(Some("image/png"), Bytes::from_static(b"\x89PNG\r\n"))
    }

    fn encode_json(model_id: &str, prompt: &str, file: Option<&Attachment>) -> serde_json::Value {
        let model = find_model(model_id).unwrap();
        let bytes = encode_request(model, prompt, file).to_json_bytes().unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_text_only_content_request() {
        let body = encode_json("gemini-2.0-flash", "hello", None);
        assert_eq!(
            body,
            json!({"contents": [{"role": "user", "parts": [{"text": "hello"}]}]})
        );
    }

    #[test]
    fn test_analysis_model_inlines_attachment() {
        let file = png();
        let body = encode_json("gemini-1.5-pro", "what is this?", Some(&file));
        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts.as_array().unwrap().len(), 2);
        assert_eq!(parts[0]["text"], "what is this?");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[1]["inlineData"]["data"], "iVBORw0K");
    }

    #[test]
    fn test_generation_model_uses_file_data_reference() {
        let file = png();
        let body = encode_json("gemini-2.0-flash-exp-image-generation", "restyle", Some(&file));
        let parts = &body["contents"][0]["parts"];
        assert_eq!(
            parts[1],
            json!({"fileData": {"mimeType": "image/png", "fileUri": "iVBORw0K"}})
        );
        assert!(parts[1].get("inlineData").is_none());
        assert_eq!(
            body["generationConfig"]["responseModalities"],
            json!(["TEXT", "IMAGE"])
        );
    }

    #[test]
    fn test_text_only_model_drops_attachment() {
        let file = png();
        let body = encode_json("gemini-1.0-pro", "hi", Some(&file));
        assert_eq!(
            body["contents"][0]["parts"],
            json!([{"text": "hi"}])
        );
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn test_image_request_shapes() {
        let plain = encode_json("imagen-3.0-generate-002", "a red fox", None);
        assert_eq!(plain, json!({"prompt": {"text": "a red fox"}}));

        let file = png();
        let with_file = encode_json("imagen-3.0-generate-002", "a red fox", Some(&file));
        assert_eq!(
            with_file["prompt"]["image"]["inlineData"],
            json!({"mimeType": "image/png", "data": "iVBORw0K"})
        );
    }
}
