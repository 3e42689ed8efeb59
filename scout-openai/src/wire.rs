//! Wire types for the OpenAI chat completions API and the extraction
//! payload the model is instructed to produce.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct ChatBody<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub response_format: ResponseFormat<'a>,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    pub format_type: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceMessage {
    pub content: Option<String>,
}

/// The JSON document the model is asked to emit.
#[derive(Debug, Deserialize)]
pub(crate) struct ExtractionDoc {
    #[serde(default)]
    pub signals: Vec<ExtractedSignal>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExtractedSignal {
    pub kind: Option<String>,
    pub title: String,
    pub summary: Option<String>,
    pub url: Option<String>,
}
