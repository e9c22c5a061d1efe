//! Product photo generation on top of the Gemini image API.
//!
//! A [`GenerationConfig`] is expanded into one prompt per requested image,
//! each prompt is paired with the uploaded product photo (and optional
//! background photo), and all requests are sent concurrently. Failed
//! requests are dropped; the rest come back in submission order.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod gallery;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod prompt;
pub mod request;
pub mod studio;

pub use config::{Credential, GeminiConfig};
pub use dispatcher::GenerationDispatcher;
pub use error::{Result, StudioError};
pub use gallery::Gallery;
pub use gemini::{GeminiImageClient, ImageTransport};
pub use models::*;
pub use prompt::build_prompts;
pub use request::{assemble, GenerationRequest};
pub use studio::Studio;
