use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, Part};
use crate::ai::TextGenerationService;
use crate::models::MemeContent;
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct TextRequest {
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: TextGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TextGenerationConfig {
    response_mime_type: &'static str,
    response_schema: Schema,
}

/// Minimal subset of Gemini's OpenAPI-style response schema.
#[derive(Debug, Serialize)]
struct Schema {
    #[serde(rename = "type")]
    schema_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<BTreeMap<&'static str, Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    required: Option<Vec<&'static str>>,
}

impl Schema {
    fn string(description: &'static str) -> Self {
        Self {
            schema_type: "STRING",
            description: Some(description),
            properties: None,
            required: None,
        }
    }

    /// Schema the text model must fill in: caption and imagePrompt are
    /// required, humorExplanation is optional.
    fn meme_content() -> Self {
        let mut properties = BTreeMap::new();
        properties.insert(
            "caption",
            Schema::string("The text that goes on the meme image."),
        );
        properties.insert(
            "imagePrompt",
            Schema::string("A detailed description of the visual scene for an image generator."),
        );
        properties.insert(
            "humorExplanation",
            Schema::string("A short, sarcastic remark about why this is funny."),
        );

        Self {
            schema_type: "OBJECT",
            description: None,
            properties: Some(properties),
            required: Some(vec!["caption", "imagePrompt"]),
        }
    }
}

pub struct GeminiTextClient {
    http: GeminiHttpClient,
}

impl GeminiTextClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new(api_key, model, Duration::from_secs(30), client),
        }
    }

    fn extract_text(response: &GenerateContentResponse) -> Option<String> {
        response.candidates.first().and_then(|c| {
            c.content.parts.iter().find_map(|p| match p {
                Part::Text { text } => Some(text.clone()),
                Part::InlineData { .. } => None,
            })
        })
    }
}

#[cfg(test)]
super::impl_with_gemini_base_url!(GeminiTextClient);

#[async_trait]
impl TextGenerationService for GeminiTextClient {
    async fn generate_meme_text(&self, topic: &str) -> Result<MemeContent> {
        let request = TextRequest {
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part::Text {
                    text: prompts::MEME_SYSTEM.to_string(),
                }],
            }),
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::Text {
                    text: prompts::render(prompts::MEME_USER, &[("topic", topic)]),
                }],
            }],
            generation_config: TextGenerationConfig {
                response_mime_type: "application/json",
                response_schema: Schema::meme_content(),
            },
        };

        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        let text = Self::extract_text(&response)
            .ok_or_else(|| Error::AiProvider("No text in Gemini meme response".to_string()))?;

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!("Gemini meme text is not valid MemeContent: {}\nText: {}", e, text);
            Error::AiProvider(format!("Gemini returned malformed meme content: {}", e))
        })
    }
}
