//! Gemini `generateContent` payload types.
//!
//! Requests are written in the snake_case form (`inline_data`, `mime_type`);
//! the camelCase spellings the API uses in responses are accepted on decode.

use crate::models::Turn;
use crate::prompts;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Gemini content container used in both requests and responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Untagged union of text and inline media content parts.
///
/// Variant order matters for `#[serde(untagged)]` decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(alias = "inlineData")]
        inline_data: InlineData,
    },
}

/// Base64 inline payload used for image/vision requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineData {
    #[serde(alias = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

/// Request body for a single stateless turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Lay out a turn as parts: the image first when present, then the text.
    ///
    /// An image turn with no text gets [`prompts::DEFAULT_IMAGE_PROMPT`];
    /// a text-only turn is sent verbatim.
    pub fn from_turn(turn: &Turn) -> Self {
        let parts = match &turn.image {
            Some(image) => {
                let text = if turn.text.is_empty() {
                    prompts::DEFAULT_IMAGE_PROMPT.to_string()
                } else {
                    turn.text.clone()
                };
                vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type().to_string(),
                            data: image.base64_payload().to_string(),
                        },
                    },
                    Part::Text { text },
                ]
            }
            None => vec![Part::Text {
                text: turn.text.clone(),
            }],
        };

        Self {
            contents: vec![Content { role: None, parts }],
        }
    }
}

/// `candidates[0].content.parts[0].text`, when present and non-empty.
///
/// Read by path rather than decoded so that parts or candidates of other
/// shapes (`functionCall`, `executableCode`, ...) elsewhere in the body do
/// not hide the text.
pub fn first_candidate_text(body: &Value) -> Option<&str> {
    body.pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}
