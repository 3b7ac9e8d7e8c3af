//! AI service integration for meme text and image generation
//!
//! Provides trait boundaries around the two external generation steps and a
//! Gemini-backed implementation of each, plus mocks for testing.

pub mod gemini;
pub mod mock;

pub use gemini::{GeminiImageClient, GeminiTextClient};
pub use mock::{MockImageClient, MockTextClient};

use crate::models::MemeContent;
use crate::Result;
use async_trait::async_trait;

/// Turns a user topic into meme text (caption plus image prompt).
#[async_trait]
pub trait TextGenerationService: Send + Sync {
    async fn generate_meme_text(&self, topic: &str) -> Result<MemeContent>;
}

/// Renders a descriptive prompt into an image, returned as a self-contained
/// base64 `data:` URI.
#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<String>;
}
