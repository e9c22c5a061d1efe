//! Gemini `generateContent` payloads.

use serde::{Deserialize, Serialize};

use crate::models::image::ImagePayload;

/// Request part. Image parts borrow the caller's payload so one upload is
/// shared by every request in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RequestPart<'a> {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: &'a ImagePayload,
    },
    Text {
        text: String,
    },
}

impl RequestPart<'_> {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RequestPart::Text { text } => Some(text),
            RequestPart::InlineData { .. } => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RequestContent<'a> {
    pub parts: &'a [RequestPart<'a>],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseConfig {
    pub response_modalities: Vec<String>,
}

impl ResponseConfig {
    pub fn image_only() -> Self {
        Self {
            response_modalities: vec!["IMAGE".to_string()],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<RequestContent<'a>>,
    pub generation_config: ResponseConfig,
}

impl<'a> GenerateContentRequest<'a> {
    pub fn image_only(parts: &'a [RequestPart<'a>]) -> Self {
        Self {
            contents: vec![RequestContent { parts }],
            generation_config: ResponseConfig::image_only(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub inline_data: Option<ImagePayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Inline image of the first part of the first candidate, if that part is one.
    pub fn first_inline_image(&self) -> Option<&ImagePayload> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        if self.candidates.len() > 1 || parts.len() > 1 {
            log::debug!(
                "Response has {} candidates and {} parts in the first; keeping the first only",
                self.candidates.len(),
                parts.len()
            );
        }
        parts.first()?.inline_data.as_ref()
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates.first()?.finish_reason.as_deref()
    }
}
