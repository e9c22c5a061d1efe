use std::path::Path;
use std::sync::Arc;

use crate::{
    config::GeminiConfig,
    dispatcher::GenerationDispatcher,
    error::{Result, StudioError},
    gemini::{GeminiImageClient, ImageTransport},
    logger,
    models::{mime_for_path, GenerationConfig, GenerationResult, ImagePayload},
    prompt::build_prompts,
};

/// Entry point for product photo batches: validation, prompt building and
/// fan-out behind one call.
#[derive(Clone)]
pub struct Studio {
    dispatcher: GenerationDispatcher,
}

impl Studio {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let transport = Arc::new(GeminiImageClient::new(&config));
        Self::with_transport(&config, transport)
    }

    pub fn with_transport(
        config: &GeminiConfig,
        transport: Arc<dyn ImageTransport>,
    ) -> Result<Self> {
        config.validate()?;
        let dispatcher = GenerationDispatcher::new(transport, config)?;
        Ok(Self { dispatcher })
    }

    /// Checks the source file and form before anything is read or sent.
    pub fn check_preconditions<'p>(
        config: &GenerationConfig,
        product: Option<&'p Path>,
    ) -> Result<&'p Path> {
        let product = product.ok_or_else(|| {
            StudioError::ValidationError("Please upload a product image first.".into())
        })?;
        if mime_for_path(product).is_none() {
            return Err(StudioError::ValidationError(format!(
                "{} is not an image. Image generation requires an image file.",
                product.display()
            )));
        }
        config.validate()?;
        Ok(product)
    }

    pub async fn generate(
        &self,
        config: &GenerationConfig,
        product: &ImagePayload,
        background: Option<&ImagePayload>,
    ) -> Result<Vec<GenerationResult>> {
        config.validate()?;

        let entries = build_prompts(config);
        log::info!(
            "📝 Built {} prompts for \"{}\" ({})",
            entries.len(),
            config.product_description.trim(),
            config
                .selected_styles
                .iter()
                .map(|style| style.label())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let _timer = logger::timer("image batch");
        Ok(self.dispatcher.dispatch(&entries, product, background).await)
    }

    /// Encodes the files, then generates. Encoding failures abort the batch.
    pub async fn generate_from_files(
        &self,
        config: &GenerationConfig,
        product: &Path,
        background: Option<&Path>,
    ) -> Result<Vec<GenerationResult>> {
        Self::check_preconditions(config, Some(product))?;

        let product = ImagePayload::from_path(product)?;
        let background = background.map(ImagePayload::from_path).transpose()?;

        self.generate(config, &product, background.as_ref()).await
    }
}
