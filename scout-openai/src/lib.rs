//! Engine connector that extracts buying signals from free text with an
//! OpenAI chat model.
//!
//! The model is prompted in JSON mode to return a `{"signals": [...]}`
//! document; the adapter validates and maps it onto [`Signal`] records. A
//! syntactically valid completion that is not the expected document is a
//! [`ScoutError::Data`] failure, same as a malformed HTTP payload.

mod builder;
mod wire;

use async_trait::async_trait;
use chrono::Utc;

use scout_core::connector::{EngineConnector, SignalExtractionProvider};
use scout_core::{Domain, ScoutError, Signal, SignalKind};

pub use builder::OpenAiConnectorBuilder;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

const SYSTEM_PROMPT: &str = "You extract B2B buying signals from text about a company. \
Respond with a JSON object: {\"signals\": [{\"kind\": \"hiring|funding|expansion|leadership|product_launch|news|other\", \
\"title\": \"...\", \"summary\": \"...\", \"url\": \"...\"}]}. \
Only include signals the text actually supports. An empty list is a valid answer.";

/// Connector backed by the OpenAI chat completions endpoint.
pub struct OpenAiConnector {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiConnector {
    /// Engine key used in routing policies and budget configuration.
    pub const KEY: &'static str = "openai";

    /// Start building a connector.
    #[must_use]
    pub fn builder() -> OpenAiConnectorBuilder {
        OpenAiConnectorBuilder::default()
    }
}

fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ScoutError> {
    let status = resp.status().as_u16();
    if resp.status().is_success() {
        return Ok(resp);
    }
    match status {
        429 => {
            let retry_after_ms = resp
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .map_or(0, |secs| secs * 1000);
            Err(ScoutError::RateLimited { retry_after_ms })
        }
        401 | 403 => Err(ScoutError::AuthFailed { status }),
        _ => Err(ScoutError::Http { status }),
    }
}

fn kind_from_str(kind: Option<&str>) -> SignalKind {
    match kind {
        Some("hiring") => SignalKind::Hiring,
        Some("funding") => SignalKind::Funding,
        Some("expansion") => SignalKind::Expansion,
        Some("leadership") => SignalKind::Leadership,
        Some("product_launch") => SignalKind::ProductLaunch,
        Some("news") => SignalKind::News,
        _ => SignalKind::Other,
    }
}

#[async_trait]
impl SignalExtractionProvider for OpenAiConnector {
    async fn extract_signals(
        &self,
        domain: &Domain,
        corpus: &str,
    ) -> Result<Vec<Signal>, ScoutError> {
        if corpus.trim().is_empty() {
            return Ok(Vec::new());
        }
        let body = wire::ChatBody {
            model: &self.model,
            messages: vec![
                wire::ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                wire::ChatMessage {
                    role: "user",
                    content: format!("Company: {domain}\n\nText:\n{corpus}"),
                },
            ],
            response_format: wire::ResponseFormat {
                format_type: "json_object",
            },
            temperature: 0.0,
        };
        let resp = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ScoutError::Network(e.to_string()))?;
        let raw: wire::ChatResponse = check_status(resp)?
            .json()
            .await
            .map_err(|e| ScoutError::Data(e.to_string()))?;

        let content = raw
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .ok_or_else(|| ScoutError::Data("completion had no content".into()))?;
        let doc: wire::ExtractionDoc = serde_json::from_str(content)
            .map_err(|e| ScoutError::Data(format!("extraction document: {e}")))?;

        let observed_at = Utc::now();
        Ok(doc
            .signals
            .into_iter()
            .enumerate()
            .map(|(i, s)| {
                let kind = kind_from_str(s.kind.as_deref());
                Signal {
                    id: format!("{domain}:{i}:{kind:?}").to_lowercase(),
                    kind,
                    title: s.title,
                    summary: s.summary,
                    url: s.url,
                    source: Self::KEY.to_string(),
                    observed_at,
                }
            })
            .collect())
    }
}

#[async_trait]
impl EngineConnector for OpenAiConnector {
    fn name(&self) -> &'static str {
        Self::KEY
    }

    fn vendor(&self) -> &'static str {
        "OpenAI"
    }

    fn as_signal_extraction_provider(&self) -> Option<&dyn SignalExtractionProvider> {
        Some(self)
    }
}
