//! Shared Gemini payload types used by the text and image adapters.

use serde::{Deserialize, Serialize};

/// Gemini content container used in both requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

/// Untagged union of text and inline media content parts.
///
/// Variant order matters for `#[serde(untagged)]` decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

/// Base64 inline payload carried in image responses. The MIME type is
/// occasionally omitted by the API, so it stays optional here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub data: String,
}

/// Top-level `generateContent` response envelope.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Vec<Candidate>,
}

/// Candidate completion item returned by Gemini.
#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Content,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_decodes_text_variant() {
        let part: Part = serde_json::from_str(r#"{"text": "hello"}"#).unwrap();
        assert!(matches!(part, Part::Text { text } if text == "hello"));
    }

    #[test]
    fn test_part_decodes_inline_data_without_mime_type() {
        let part: Part =
            serde_json::from_str(r#"{"inlineData": {"data": "aGVsbG8="}}"#).unwrap();
        match part {
            Part::InlineData { inline_data } => {
                assert!(inline_data.mime_type.is_none());
                assert_eq!(inline_data.data, "aGVsbG8=");
            }
            Part::Text { .. } => panic!("expected inline data variant"),
        }
    }
}
