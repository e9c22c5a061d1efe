use std::env;

use crate::error::{Result, StudioError};

pub const DEFAULT_MODEL_ID: &str = "gemini-2.5-flash-image";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection settings for the Gemini image API.
#[derive(Debug, Clone, Default)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model_id: Option<String>,
    pub api_base: Option<String>,
}

/// A validated, non-empty API key. Only constructed through
/// [`GeminiConfig::credential`], so holding one means the fail-fast check passed.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First few characters followed by the key length, for logs.
    pub fn masked(&self) -> String {
        let prefix: String = self.0.chars().take(4).collect();
        format!("{}... ({} chars)", prefix, self.0.chars().count())
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Credential({})", self.masked())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `GEMINI_API_KEY` (or `API_KEY`), `GEMINI_MODEL` and `GEMINI_API_BASE`.
    pub fn from_env() -> Self {
        GeminiConfig {
            api_key: non_empty_env("GEMINI_API_KEY").or_else(|| non_empty_env("API_KEY")),
            model_id: non_empty_env("GEMINI_MODEL"),
            api_base: non_empty_env("GEMINI_API_BASE"),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Rejects an API base that is not an http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let base = self.base_url();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(StudioError::ConfigError(format!(
                "API base must be an http(s) URL, got '{}'",
                base
            )));
        }
        Ok(())
    }

    pub fn model(&self) -> &str {
        self.model_id
            .as_deref()
            .map(str::trim)
            .filter(|model| !model.is_empty())
            .unwrap_or(DEFAULT_MODEL_ID)
    }

    pub fn base_url(&self) -> String {
        self.api_base
            .as_deref()
            .map(|base| base.trim().trim_end_matches('/'))
            .filter(|base| !base.is_empty())
            .unwrap_or(DEFAULT_API_BASE)
            .to_string()
    }

    pub fn credential(&self) -> Result<Credential> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| Credential(key.to_string()))
            .ok_or_else(|| {
                StudioError::MissingCredential(
                    "GEMINI_API_KEY (or API_KEY) environment variable not set".into(),
                )
            })
    }
}
