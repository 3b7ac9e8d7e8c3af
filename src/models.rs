//! Data models and structures
//!
//! Defines the core data structures for meme content, generated memes, the
//! generation lifecycle, and environment configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::data_uri;

/// Output of the text-generation step.
///
/// `image_prompt` is only ever fed to the image model; it is never shown to
/// the user. `humor_explanation` is decorative commentary and may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemeContent {
    pub caption: String,
    pub image_prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humor_explanation: Option<String>,
}

/// A completed meme. Immutable once constructed; a new submission always
/// produces a new instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedMeme {
    pub id: String,
    pub content: MemeContent,
    /// Base64 `data:` URI embedding the rendered image and its MIME type.
    pub image_url: String,
    pub timestamp: DateTime<Utc>,
}

impl GeneratedMeme {
    pub fn new(content: MemeContent, image_url: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content,
            image_url,
            timestamp: Utc::now(),
        }
    }

    /// Writes the raw image bytes to `dir`, named after the meme's ID with
    /// an extension derived from the embedded MIME type.
    pub fn save_image(&self, dir: &Path) -> crate::Result<PathBuf> {
        let (mime_type, bytes) = data_uri::decode(&self.image_url)?;
        let path = dir.join(format!(
            "meme-{}.{}",
            self.id,
            data_uri::extension_for(&mime_type)
        ));
        fs::write(&path, bytes)?;
        Ok(path)
    }
}

/// Position in the generation lifecycle. Exactly one stage is active at any
/// time; it is the sole driver of what the view renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    GeneratingText,
    GeneratingImage,
    Complete,
    Error,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub text_model: String,
    pub image_model: String,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .map_err(|_| crate::Error::Generic("GEMINI_API_KEY not set".to_string()))?,
            text_model: std::env::var("MEME_TEXT_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            image_model: std::env::var("MEME_IMAGE_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash-image".to_string()),
        })
    }
}
