use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::{
    config::Credential,
    error::{Result, StudioError},
    gemini::ImageTransport,
    models::{Candidate, Content, GenerateContentResponse, ImagePayload, ResponsePart},
    request::GenerationRequest,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Image,
    NetworkError,
    NoCandidates,
    TextOnly,
    NonImageData,
}

/// Scripted transport: every request succeeds unless its index has another
/// outcome. Later indices answer first so completion order differs from
/// submission order.
#[derive(Default)]
pub struct MockTransport {
    outcomes: HashMap<usize, Outcome>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<(usize, String, usize)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outcome(mut self, index: usize, outcome: Outcome) -> Self {
        self.outcomes.insert(index, outcome);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(index, prompt, part count)` for every call, in completion order.
    pub fn seen(&self) -> Vec<(usize, String, usize)> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn image_for(index: usize) -> ImagePayload {
        ImagePayload::from_bytes("image/png", format!("image-{}", index).as_bytes()).unwrap()
    }
}

#[async_trait]
impl ImageTransport for MockTransport {
    fn model_id(&self) -> &str {
        "mock-image-model"
    }

    async fn generate(
        &self,
        _credential: &Credential,
        request: &GenerationRequest<'_>,
    ) -> Result<GenerateContentResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = 20u64.saturating_sub(request.index as u64 * 2);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        self.prompts.lock().unwrap().push((
            request.index,
            request.prompt.clone(),
            request.parts.len(),
        ));

        let outcome = self
            .outcomes
            .get(&request.index)
            .copied()
            .unwrap_or(Outcome::Image);
        let part = match outcome {
            Outcome::NetworkError => {
                return Err(StudioError::RequestError("connection reset".into()))
            }
            Outcome::NoCandidates => return Ok(GenerateContentResponse::default()),
            Outcome::TextOnly => ResponsePart {
                text: Some("no image for you".to_string()),
                inline_data: None,
            },
            Outcome::NonImageData => ResponsePart {
                text: None,
                inline_data: Some(ImagePayload {
                    mime_type: "application/octet-stream".to_string(),
                    data: "QUJD".to_string(),
                }),
            },
            Outcome::Image => ResponsePart {
                text: None,
                inline_data: Some(Self::image_for(request.index)),
            },
        };

        Ok(GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content { parts: vec![part] }),
                finish_reason: Some("STOP".to_string()),
            }],
        })
    }
}
