pub mod image_client;
#[cfg(test)]
pub(crate) mod mock;

use crate::{
    config::Credential, error::Result, models::GenerateContentResponse,
    request::GenerationRequest,
};
use async_trait::async_trait;

pub use image_client::GeminiImageClient;

/// The remote image generation service. One call per assembled request.
#[async_trait]
pub trait ImageTransport: Send + Sync {
    fn model_id(&self) -> &str;

    async fn generate(
        &self,
        credential: &Credential,
        request: &GenerationRequest<'_>,
    ) -> Result<GenerateContentResponse>;
}
