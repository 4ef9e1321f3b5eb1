//! Static capability table for the Gemini models this relay can reach.

use std::fmt;

use serde::Serialize;

/// A declared model capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Modality {
    Text,
    ImageAnalysis,
    ImageGeneration,
    Audio,
    Video,
}

/// The provider method a model is invoked through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Endpoint {
    #[serde(rename = "generateContent")]
    GenerateContent,
    #[serde(rename = "generateImage")]
    GenerateImage,
}

impl Endpoint {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Endpoint::GenerateContent => "generateContent",
            Endpoint::GenerateImage => "generateImage",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
    pub capabilities: &'static [Modality],
    pub endpoint: Endpoint,
    pub api_version: &'static str,
}

impl ModelDescriptor {
    #[must_use]
    pub fn supports(&self, modality: Modality) -> bool {
        self.capabilities.contains(&modality)
    }
}

const MULTIMODAL: &[Modality] = &[
    Modality::Text,
    Modality::ImageAnalysis,
    Modality::Audio,
    Modality::Video,
];

pub static MODELS: &[ModelDescriptor] = &[
    ModelDescriptor {
        id: "gemini-2.0-flash",
        display_name: "Gemini 2.0 Flash",
        capabilities: MULTIMODAL,
        endpoint: Endpoint::GenerateContent,
        api_version: "v1beta",
    },
    ModelDescriptor {
        id: "gemini-2.0-flash-lite",
        display_name: "Gemini 2.0 Flash-Lite",
        capabilities: MULTIMODAL,
        endpoint: Endpoint::GenerateContent,
        api_version: "v1beta",
    },
    ModelDescriptor {
        id: "gemini-1.5-pro",
        display_name: "Gemini 1.5 Pro",
        capabilities: MULTIMODAL,
        endpoint: Endpoint::GenerateContent,
        api_version: "v1beta",
    },
    ModelDescriptor {
        id: "gemini-1.5-flash",
        display_name: "Gemini 1.5 Flash",
        capabilities: MULTIMODAL,
        endpoint: Endpoint::GenerateContent,
        api_version: "v1beta",
    },
    ModelDescriptor {
        id: "gemini-1.0-pro",
        display_name: "Gemini 1.0 Pro",
        capabilities: &[Modality::Text],
        endpoint: Endpoint::GenerateContent,
        api_version: "v1",
    },
    ModelDescriptor {
        id: "gemini-2.0-flash-exp-image-generation",
        display_name: "Gemini 2.0 Flash Image Generation",
        capabilities: &[Modality::Text, Modality::ImageGeneration],
        endpoint: Endpoint::GenerateContent,
        api_version: "v1beta",
    },
    ModelDescriptor {
        id: "imagen-3.0-generate-002",
        display_name: "Imagen 3",
        capabilities: &[Modality::ImageGeneration],
        endpoint: Endpoint::GenerateImage,
        api_version: "v1beta",
    },
];

/// Look up a model by its exact id.
#[must_use]
pub fn find_model(id: &str) -> Option<&'static ModelDescriptor> {
    MODELS.iter().find(|model| model.id == id)
}
