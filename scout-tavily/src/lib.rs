//! Engine connector for the Tavily web search API.
//!
//! Discovery-only: Tavily returns ranked web pages with content snippets,
//! which the adapter maps to company records keyed by the page's root
//! domain. Noise domains and repeat roots are dropped.

mod builder;
mod wire;

use async_trait::async_trait;

use scout_core::connector::{DiscoveryProvider, EngineConnector};
use scout_core::domain::is_noise_domain;
use scout_core::{CompanyRecord, DiscoveryRequest, Domain, ScoutError};

pub use builder::TavilyConnectorBuilder;

const DEFAULT_BASE_URL: &str = "https://api.tavily.com";
const DEFAULT_MAX_RESULTS: usize = 20;

/// Connector backed by the Tavily `/search` endpoint.
pub struct TavilyConnector {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TavilyConnector {
    /// Engine key used in routing policies and budget configuration.
    pub const KEY: &'static str = "tavily";

    /// Start building a connector.
    #[must_use]
    pub fn builder() -> TavilyConnectorBuilder {
        TavilyConnectorBuilder::default()
    }

    fn to_record(result: &wire::SearchResult) -> Option<CompanyRecord> {
        let host = url::Url::parse(&result.url).ok()?.host_str()?.to_string();
        let domain = Domain::parse(&host).ok()?;
        if is_noise_domain(&domain) {
            return None;
        }
        let name = result
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| domain.root().to_string());
        let mut company = CompanyRecord::new(name, domain);
        company.description = result.content.clone();
        company.relevance = result.score;
        company.sources = vec![Self::KEY.to_string()];
        Some(company)
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

#[async_trait]
impl DiscoveryProvider for TavilyConnector {
    async fn discover(&self, req: &DiscoveryRequest) -> Result<Vec<CompanyRecord>, ScoutError> {
        let mut query = req.query().to_string();
        for vertical in &req.verticals {
            query.push_str(&format!(" {vertical}"));
        }
        for region in &req.regions {
            query.push_str(&format!(" {region}"));
        }
        let body = wire::SearchBody {
            query: &query,
            max_results: req.limit.map_or(DEFAULT_MAX_RESULTS, |l| l.max(10)),
            search_depth: "basic",
        };
        let resp = self
            .client
            .post(format!("{}/search", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ScoutError::Network(e.to_string()))?;
        let raw: wire::SearchResponse = check_status(resp)?
            .json()
            .await
            .map_err(|e| ScoutError::Data(e.to_string()))?;

        let mut seen_roots: Vec<String> = Vec::new();
        let mut companies = Vec::new();
        for result in &raw.results {
            let Some(company) = Self::to_record(result) else {
                continue;
            };
            if let (Some(floor), Some(relevance)) = (req.min_relevance, company.relevance)
                && relevance < floor
            {
                continue;
            }
            let root = company.domain.root().to_string();
            if seen_roots.contains(&root) {
                continue;
            }
            seen_roots.push(root);
            companies.push(company);
            if let Some(cap) = req.limit
                && companies.len() >= cap
            {
                break;
            }
        }
        Ok(companies)
    }
}

#[async_trait]
impl EngineConnector for TavilyConnector {
    fn name(&self) -> &'static str {
        Self::KEY
    }

    fn vendor(&self) -> &'static str {
        "Tavily"
    }

    fn as_discovery_provider(&self) -> Option<&dyn DiscoveryProvider> {
        Some(self)
    }
}
