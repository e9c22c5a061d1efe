use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};

use crate::{
    config::{Credential, GeminiConfig},
    error::{Result, StudioError},
    gemini::ImageTransport,
    models::{GenerateContentRequest, GenerateContentResponse},
    request::GenerationRequest,
};

#[derive(Clone)]
pub struct GeminiImageClient {
    client: Client,
    endpoint: String,
    model_id: String,
}

impl GeminiImageClient {
    pub fn new(config: &GeminiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &GeminiConfig) -> Self {
        let model_id = config.model().to_string();
        let model_path = if model_id.starts_with("models/") {
            model_id.clone()
        } else {
            format!("models/{}", model_id)
        };

        Self {
            client,
            endpoint: format!("{}/{}:generateContent", config.base_url(), model_path),
            model_id,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ImageTransport for GeminiImageClient {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate(
        &self,
        credential: &Credential,
        request: &GenerationRequest<'_>,
    ) -> Result<GenerateContentResponse> {
        let body = serde_json::to_vec(&GenerateContentRequest::image_only(&request.parts))
            .map_err(|e| StudioError::SerializationError(e.to_string()))?;

        log::debug!(
            "POST {} (#{}, style {}, background image: {})",
            self.endpoint,
            request.index,
            request.style,
            request.has_background()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", credential.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| StudioError::RequestError(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(StudioError::ResponseError(format!(
                "Gemini returned {}: {}",
                status, error_text
            )));
        }

        response.json::<GenerateContentResponse>().await.map_err(|e| {
            StudioError::ResponseError(format!("Failed to parse Gemini response: {}", e))
        })
    }
}
