use super::{ImageGenerationService, TextGenerationService};
use crate::models::MemeContent;
use crate::{data_uri, Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

// Tiny valid 1x1 PNG used as the default mock image.
const DEFAULT_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
    0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR chunk
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1 pixel
    0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44,
    0x41, // IDAT chunk
    0x54, 0x08, 0x99, 0x63, 0xF8, 0xCF, 0xC0, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0xE2, 0x25,
    0x00, 0xBC, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, // IEND chunk
    0x44, 0xAE, 0x42, 0x60, 0x82,
];

type Scripted<T> = Arc<Mutex<Vec<std::result::Result<T, String>>>>;

#[derive(Clone)]
pub struct MockTextClient {
    responses: Scripted<MemeContent>,
    topics: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockTextClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            topics: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_content_response(self, response: MemeContent) -> Self {
        self.responses.lock().unwrap().push(Ok(response));
        self
    }

    pub fn with_failure(self, message: &str) -> Self {
        self.responses.lock().unwrap().push(Err(message.to_string()));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Topics received so far, in call order.
    pub fn recorded_topics(&self) -> Vec<String> {
        self.topics.lock().unwrap().clone()
    }
}

impl Default for MockTextClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerationService for MockTextClient {
    async fn generate_meme_text(&self, topic: &str) -> Result<MemeContent> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        self.topics.lock().unwrap().push(topic.to_string());

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Default mock response
            return Ok(MemeContent {
                caption: format!("When {} strikes again", topic),
                image_prompt: format!("A dramatic photo about {}", topic),
                humor_explanation: None,
            });
        }

        let index = (*count - 1) % responses.len();
        responses[index]
            .clone()
            .map_err(Error::AiProvider)
    }
}

#[derive(Clone)]
pub struct MockImageClient {
    responses: Scripted<(String, Vec<u8>)>,
    prompts: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockImageClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_image_response(self, mime_type: &str, bytes: Vec<u8>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(Ok((mime_type.to_string(), bytes)));
        self
    }

    pub fn with_failure(self, message: &str) -> Self {
        self.responses.lock().unwrap().push(Err(message.to_string()));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Prompts received so far, in call order.
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockImageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageClient {
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        self.prompts.lock().unwrap().push(prompt.to_string());

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(data_uri::encode("image/png", DEFAULT_PNG));
        }

        let index = (*count - 1) % responses.len();
        match &responses[index] {
            Ok((mime_type, bytes)) => Ok(data_uri::encode(mime_type, bytes)),
            Err(message) => Err(Error::AiProvider(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_text_client_default_response_mentions_topic() {
        let client = MockTextClient::new();

        let content = client.generate_meme_text("printers").await.unwrap();
        assert!(content.caption.contains("printers"));
        assert!(content.image_prompt.contains("printers"));
        assert!(content.humor_explanation.is_none());
    }

    #[tokio::test]
    async fn test_mock_text_client_cycles_scripted_responses() {
        let first = MemeContent {
            caption: "first".to_string(),
            image_prompt: "one".to_string(),
            humor_explanation: None,
        };
        let second = MemeContent {
            caption: "second".to_string(),
            image_prompt: "two".to_string(),
            humor_explanation: None,
        };
        let client = MockTextClient::new()
            .with_content_response(first.clone())
            .with_content_response(second.clone());

        assert_eq!(client.generate_meme_text("a").await.unwrap(), first);
        assert_eq!(client.generate_meme_text("b").await.unwrap(), second);
        // Cycles back around
        assert_eq!(client.generate_meme_text("c").await.unwrap(), first);
    }

    #[tokio::test]
    async fn test_mock_text_client_records_topics_and_failures() {
        let client = MockTextClient::new().with_failure("model asleep");

        let err = client.generate_meme_text("work").await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
        assert_eq!(client.get_call_count(), 1);
        assert_eq!(client.recorded_topics(), vec!["work".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_image_client_default_is_png_data_uri() {
        let client = MockImageClient::new();

        let uri = client.generate_image("anything").await.unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(client.recorded_prompts(), vec!["anything".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_image_client_scripted_response() {
        let client = MockImageClient::new().with_image_response("image/jpeg", vec![1, 2, 3]);

        let uri = client.generate_image("scene").await.unwrap();
        assert_eq!(uri, data_uri::encode("image/jpeg", &[1, 2, 3]));
    }
}
