//! Turns a [`GenerationConfig`] into one prompt per requested image.
//!
//! Prompts are grouped by style in the fixed order e-commerce, lifestyle,
//! model. Copies of the same style are textually identical.

use crate::models::{
    Gender, GenerationConfig, Height, ModelOptions, PromptEntry, SkinTone, StyleKind,
};

pub const DEFAULT_LIFESTYLE_SETTING: &str = "a neutral, modern environment";
pub const DEFAULT_MODEL_SETTING: &str = "a stylish, blurred setting";
pub const DEFAULT_GESTURE: &str = "elegantly posing";
pub const DEFAULT_MODEL_DESCRIPTOR: &str = "person";

/// Clause prefixes that close lifestyle and model prompts respectively.
pub const SETTING_CLAUSE: &str = "The setting is:";
pub const BACKGROUND_CLAUSE: &str = "The background is:";

/// Assumes `config` already passed [`GenerationConfig::validate`].
pub fn build_prompts(config: &GenerationConfig) -> Vec<PromptEntry> {
    let copies = config.images_per_style as usize;
    let mut entries = Vec::with_capacity(config.total_images());

    // BTreeSet iteration follows StyleKind's ordering.
    for &style in &config.selected_styles {
        let text = prompt_for(style, config);
        for _ in 0..copies {
            entries.push(PromptEntry {
                style,
                text: text.clone(),
                index: entries.len(),
            });
        }
    }

    entries
}

pub fn prompt_for(style: StyleKind, config: &GenerationConfig) -> String {
    let product = &config.product_description;
    match style {
        StyleKind::Ecommerce => format!(
            "High-quality e-commerce product photo of {} on a pure white background. \
             Clean, professional studio lighting, front-facing view.",
            product
        ),
        StyleKind::Lifestyle => format!(
            "A lifestyle photo of {}. {} {}.",
            product,
            SETTING_CLAUSE,
            or_default(&config.background_description, DEFAULT_LIFESTYLE_SETTING)
        ),
        StyleKind::Model => format!(
            "Photo of a {} as a model. The model is {} and is showcasing {}. {} {}.",
            model_descriptor(&config.model_options),
            or_default(&config.model_options.gesture, DEFAULT_GESTURE),
            product,
            BACKGROUND_CLAUSE,
            or_default(&config.background_description, DEFAULT_MODEL_SETTING)
        ),
    }
}

/// Height, skin tone and gender joined with ", ", skipping `Any`.
pub fn model_descriptor(options: &ModelOptions) -> String {
    let mut words = Vec::with_capacity(3);
    if options.height != Height::Any {
        words.push(options.height.label().to_lowercase());
    }
    if options.skin_tone != SkinTone::Any {
        words.push(format!("{} skin", options.skin_tone.label().to_lowercase()));
    }
    if options.gender != Gender::Any {
        words.push(options.gender.label().to_lowercase());
    }

    if words.is_empty() {
        DEFAULT_MODEL_DESCRIPTOR.to_string()
    } else {
        words.join(", ")
    }
}

/// Only an empty value falls back; anything else is used as given.
fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
