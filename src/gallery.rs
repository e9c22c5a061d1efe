use std::path::Path;

use crate::{
    error::Result,
    models::{GenerationConfig, GenerationResult},
    studio::Studio,
};

/// What a results view needs: the current images plus loading state.
#[derive(Debug, Default)]
pub struct Gallery {
    results: Vec<GenerationResult>,
    is_generating: bool,
    loading_count: usize,
}

/// Clears the loading flags when dropped, so every exit path (including a
/// dropped future) leaves the gallery idle.
struct Loading<'a> {
    gallery: &'a mut Gallery,
}

impl<'a> Loading<'a> {
    fn start(gallery: &'a mut Gallery, count: usize) -> Self {
        gallery.results.clear();
        gallery.is_generating = true;
        gallery.loading_count = count;
        Self { gallery }
    }
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        self.gallery.is_generating = false;
        self.gallery.loading_count = 0;
    }
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &[GenerationResult] {
        &self.results
    }

    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    /// Placeholder tiles to show while a batch is in flight.
    pub fn loading_count(&self) -> usize {
        self.loading_count
    }

    /// Writes every result into `dir` and returns how many were saved.
    /// A failed write is logged and skipped.
    pub fn save_all(&self, dir: &Path) -> usize {
        let mut saved = 0;
        for result in &self.results {
            match result.save_to(dir) {
                Ok(path) => {
                    log::info!("💾 Saved {}", path.display());
                    saved += 1;
                }
                Err(e) => log::error!(
                    "❌ Failed to save {}: {}",
                    result.download_filename(),
                    e
                ),
            }
        }
        saved
    }

    /// Runs one batch and returns how many images came back. Precondition
    /// failures leave the gallery untouched; any later failure leaves it
    /// empty and idle.
    pub async fn generate(
        &mut self,
        studio: &Studio,
        config: &GenerationConfig,
        product: Option<&Path>,
        background: Option<&Path>,
    ) -> Result<usize> {
        let product = Studio::check_preconditions(config, product)?;

        let loading = Loading::start(self, config.total_images());
        match studio.generate_from_files(config, product, background).await {
            Ok(images) => {
                if images.is_empty() {
                    log::warn!("No images were produced for this batch");
                }
                loading.gallery.results = images;
                Ok(loading.gallery.results.len())
            }
            Err(e) => {
                log::error!("Image generation failed: {}", e);
                Err(e)
            }
        }
    }
}
