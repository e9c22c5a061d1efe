//! Concurrent fan-out of one remote call per prompt.
//!
//! Every request is issued before any is awaited, and the dispatcher waits
//! for all of them to settle. A failing call only drops its own entry; the
//! rest of the batch is returned in submission order.

use futures::future::join_all;
use std::sync::Arc;

use crate::{
    config::{Credential, GeminiConfig},
    error::{Result, StudioError},
    gemini::ImageTransport,
    models::{GenerationResult, ImagePayload, PromptEntry},
    request::{assemble, GenerationRequest},
};

#[derive(Clone)]
pub struct GenerationDispatcher {
    transport: Arc<dyn ImageTransport>,
    credential: Credential,
}

impl GenerationDispatcher {
    /// Fails with `MissingCredential` before anything can be dispatched.
    pub fn new(transport: Arc<dyn ImageTransport>, config: &GeminiConfig) -> Result<Self> {
        let credential = config.credential()?;
        Ok(Self::with_credential(transport, credential))
    }

    pub fn with_credential(transport: Arc<dyn ImageTransport>, credential: Credential) -> Self {
        Self {
            transport,
            credential,
        }
    }

    pub fn model_id(&self) -> &str {
        self.transport.model_id()
    }

    pub async fn dispatch(
        &self,
        entries: &[PromptEntry],
        product: &ImagePayload,
        background: Option<&ImagePayload>,
    ) -> Vec<GenerationResult> {
        let requests: Vec<GenerationRequest<'_>> = entries
            .iter()
            .map(|entry| assemble(entry, product, background))
            .collect();
        self.dispatch_requests(&requests).await
    }

    pub async fn dispatch_requests(
        &self,
        requests: &[GenerationRequest<'_>],
    ) -> Vec<GenerationResult> {
        if requests.is_empty() {
            return Vec::new();
        }

        let batch = chrono::Utc::now().timestamp_millis();
        log::info!(
            "🎨 Dispatching {} image requests to {}",
            requests.len(),
            self.model_id()
        );

        let calls = requests
            .iter()
            .map(|request| async move { (request.index, self.settle(batch, request).await) });
        let mut settled = join_all(calls).await;

        settled.sort_by_key(|(index, _)| *index);
        let results: Vec<GenerationResult> = settled
            .into_iter()
            .filter_map(|(_, result)| result)
            .collect();

        let failed = requests.len() - results.len();
        if failed > 0 {
            log::warn!(
                "{} of {} image requests produced no image",
                failed,
                requests.len()
            );
        }
        log::info!("✅ Batch {} finished with {} images", batch, results.len());

        results
    }

    /// Runs one call and converts any failure into `None`.
    async fn settle(
        &self,
        batch: i64,
        request: &GenerationRequest<'_>,
    ) -> Option<GenerationResult> {
        match self.generate_one(batch, request).await {
            Ok(result) => Some(result),
            Err(e) => {
                log::error!(
                    "Error generating image #{} ({}) for prompt \"{}\": {}",
                    request.index,
                    request.style,
                    request.prompt,
                    e
                );
                None
            }
        }
    }

    async fn generate_one(
        &self,
        batch: i64,
        request: &GenerationRequest<'_>,
    ) -> Result<GenerationResult> {
        let response = self.transport.generate(&self.credential, request).await?;

        let image = response.first_inline_image().ok_or_else(|| {
            StudioError::ResponseError(format!(
                "no image in response (finish reason: {})",
                response.finish_reason().unwrap_or("unknown")
            ))
        })?;
        // Deserialized payloads bypass `ImagePayload::new`, so the MIME type is checked here.
        if !image.is_image() {
            return Err(StudioError::ResponseError(format!(
                "inline data is '{}', not an image",
                image.mime_type
            )));
        }

        log::debug!(
            "Image #{} received ({}, {} base64 chars)",
            request.index,
            image.mime_type,
            image.data.len()
        );

        Ok(GenerationResult::new(
            format!("{}-{}", batch, request.index),
            image,
            request.prompt.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::mock::{MockTransport, Outcome};
    use crate::models::{GenerationConfig, StyleKind};
    use crate::prompt::build_prompts;
    use std::collections::HashSet;

    fn config() -> GeminiConfig {
        GeminiConfig::new().with_api_key("test-key")
    }

    fn product() -> ImagePayload {
        ImagePayload::new("image/png", "UFJPRFVDVA==").unwrap()
    }

    fn five_entries() -> Vec<PromptEntry> {
        build_prompts(
            &GenerationConfig::new("stainless steel bottle")
                .with_images_per_style(5)
                .with_style(StyleKind::Lifestyle),
        )
    }

    #[test]
    fn test_missing_credential_fails_fast() {
        let transport = Arc::new(MockTransport::new());
        let result = GenerationDispatcher::new(transport.clone(), &GeminiConfig::new());
        assert!(matches!(result, Err(StudioError::MissingCredential(_))));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_succeed_in_submission_order() {
        let transport = Arc::new(MockTransport::new());
        let dispatcher = GenerationDispatcher::new(transport.clone(), &config()).unwrap();
        let entries = five_entries();

        let results = dispatcher.dispatch(&entries, &product(), None).await;

        assert_eq!(results.len(), 5);
        assert_eq!(transport.calls(), 5);
        for (index, result) in results.iter().enumerate() {
            assert!(result.id.ends_with(&format!("-{}", index)));
            assert_eq!(
                result.image_data,
                MockTransport::image_for(index).data_uri()
            );
            assert_eq!(result.prompt, entries[index].text);
        }

        // The mock answers later indices first.
        let completion: Vec<usize> = transport.seen().iter().map(|(i, _, _)| *i).collect();
        assert_eq!(completion, vec![4, 3, 2, 1, 0]);

        let ids: HashSet<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), 5);
    }

    #[tokio::test]
    async fn test_partial_failure_is_isolated() {
        let transport = Arc::new(
            MockTransport::new()
                .with_outcome(1, Outcome::NetworkError)
                .with_outcome(3, Outcome::NoCandidates),
        );
        let dispatcher = GenerationDispatcher::new(transport.clone(), &config()).unwrap();

        let results = dispatcher.dispatch(&five_entries(), &product(), None).await;

        assert_eq!(transport.calls(), 5);
        assert_eq!(results.len(), 3);
        let images: Vec<String> = results.iter().map(|r| r.image_data.clone()).collect();
        assert_eq!(
            images,
            [0, 2, 4]
                .iter()
                .map(|i| MockTransport::image_for(*i).data_uri())
                .collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn test_all_failing_returns_empty() {
        let transport = Arc::new(
            MockTransport::new()
                .with_outcome(0, Outcome::TextOnly)
                .with_outcome(1, Outcome::NetworkError)
                .with_outcome(2, Outcome::NoCandidates)
                .with_outcome(3, Outcome::NetworkError)
                .with_outcome(4, Outcome::TextOnly),
        );
        let dispatcher = GenerationDispatcher::new(transport.clone(), &config()).unwrap();

        let results = dispatcher.dispatch(&five_entries(), &product(), None).await;
        assert!(results.is_empty());
        assert_eq!(transport.calls(), 5);
    }

    #[tokio::test]
    async fn test_non_image_inline_data_is_dropped() {
        let transport = Arc::new(MockTransport::new().with_outcome(2, Outcome::NonImageData));
        let dispatcher = GenerationDispatcher::new(transport.clone(), &config()).unwrap();

        let results = dispatcher.dispatch(&five_entries(), &product(), None).await;

        assert_eq!(transport.calls(), 5);
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| !r.id.ends_with("-2")));
        assert!(results.iter().all(|r| r.mime_type.starts_with("image/")));
    }

    #[tokio::test]
    async fn test_background_rewrite_reaches_transport_and_result() {
        let transport = Arc::new(MockTransport::new());
        let dispatcher = GenerationDispatcher::new(transport.clone(), &config()).unwrap();
        let background = ImagePayload::new("image/jpeg", "Qkc=").unwrap();
        let entries = build_prompts(
            &GenerationConfig::new("sneakers")
                .with_styles([StyleKind::Ecommerce, StyleKind::Model]),
        );

        let results = dispatcher
            .dispatch(&entries, &product(), Some(&background))
            .await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].prompt, entries[0].text);
        assert!(results[1].prompt.ends_with(crate::request::COMPOSE_INTO_BACKGROUND));

        let mut seen = transport.seen();
        seen.sort();
        assert_eq!(seen[0].2, 2);
        assert_eq!(seen[1].2, 3);
        assert_eq!(seen[1].1, results[1].prompt);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let transport = Arc::new(MockTransport::new());
        let dispatcher = GenerationDispatcher::new(transport.clone(), &config()).unwrap();
        assert!(dispatcher.dispatch(&[], &product(), None).await.is_empty());
        assert_eq!(transport.calls(), 0);
    }
}
