use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, StudioError};
use crate::models::image::{extension_for_mime, ImagePayload};
use crate::models::style::{ModelOptions, StyleKind};

pub const MAX_IMAGES_PER_STYLE: u32 = 5;

/// Everything the user picked on the form for one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub product_description: String,
    pub images_per_style: u32,
    pub selected_styles: BTreeSet<StyleKind>,
    pub model_options: ModelOptions,
    pub background_description: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            product_description: String::new(),
            images_per_style: 1,
            selected_styles: BTreeSet::new(),
            model_options: ModelOptions::default(),
            background_description: String::new(),
        }
    }
}

impl GenerationConfig {
    pub fn new(product_description: impl Into<String>) -> Self {
        Self {
            product_description: product_description.into(),
            ..Default::default()
        }
    }

    pub fn with_images_per_style(mut self, count: u32) -> Self {
        self.images_per_style = count;
        self
    }

    pub fn with_style(mut self, style: StyleKind) -> Self {
        self.selected_styles.insert(style);
        self
    }

    pub fn with_styles(mut self, styles: impl IntoIterator<Item = StyleKind>) -> Self {
        self.selected_styles.extend(styles);
        self
    }

    pub fn with_model_options(mut self, options: ModelOptions) -> Self {
        self.model_options = options;
        self
    }

    pub fn with_background(mut self, description: impl Into<String>) -> Self {
        self.background_description = description.into();
        self
    }

    /// Number of images the batch asks for.
    pub fn total_images(&self) -> usize {
        self.selected_styles.len() * self.images_per_style as usize
    }

    pub fn validate(&self) -> Result<()> {
        if self.product_description.trim().is_empty() {
            return Err(StudioError::ValidationError(
                "Please provide a product description.".into(),
            ));
        }
        if self.selected_styles.is_empty() {
            return Err(StudioError::ValidationError(
                "Please select at least one photo type to generate.".into(),
            ));
        }
        if !(1..=MAX_IMAGES_PER_STYLE).contains(&self.images_per_style) {
            return Err(StudioError::ValidationError(format!(
                "Images per style must be between 1 and {}, got {}.",
                MAX_IMAGES_PER_STYLE, self.images_per_style
            )));
        }
        Ok(())
    }
}

/// One prompt, and therefore one remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptEntry {
    pub style: StyleKind,
    pub text: String,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub id: String,
    pub mime_type: String,
    /// `data:` URI, renderable without another fetch.
    pub image_data: String,
    pub prompt: String,
}

impl GenerationResult {
    pub fn new(id: impl Into<String>, image: &ImagePayload, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            mime_type: image.mime_type.clone(),
            image_data: image.data_uri(),
            prompt: prompt.into(),
        }
    }

    pub fn download_filename(&self) -> String {
        format!(
            "ai-product-shot-{}.{}",
            self.id,
            extension_for_mime(&self.mime_type)
        )
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        ImagePayload::from_data_uri(&self.image_data)?.decode()
    }

    /// Writes the image into `dir` under its download filename.
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(self.download_filename());
        fs::write(&path, self.decode()?)?;
        Ok(path)
    }
}
