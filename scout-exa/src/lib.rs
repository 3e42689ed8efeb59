//! Engine connector for the Exa neural search API.
//!
//! Serves company discovery (free-text prospecting queries) and name lookup.
//! Results are web pages, so the adapter extracts the company domain from
//! each result URL, drops noise domains (social networks, aggregators), and
//! keeps the best-scored page per root domain.

mod builder;
mod wire;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use scout_core::connector::{DiscoveryProvider, EngineConnector, NameLookupProvider};
use scout_core::domain::is_noise_domain;
use scout_core::{CompanyRecord, DiscoveryRequest, Domain, NameLookupRequest, ScoutError};

pub use builder::ExaConnectorBuilder;

const DEFAULT_BASE_URL: &str = "https://api.exa.ai";
const DEFAULT_NUM_RESULTS: usize = 25;

/// Connector backed by the Exa `/search` endpoint.
pub struct ExaConnector {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl ExaConnector {
    /// Engine key used in routing policies and budget configuration.
    pub const KEY: &'static str = "exa";

    /// Start building a connector.
    #[must_use]
    pub fn builder() -> ExaConnectorBuilder {
        ExaConnectorBuilder::default()
    }

    async fn search(&self, query: &str, limit: usize) -> Result<wire::SearchResponse, ScoutError> {
        let body = wire::SearchBody {
            query,
            num_results: limit,
            search_type: "auto",
            contents: wire::ContentsSpec { summary: true },
        };
        let resp = self
            .client
            .post(format!("{}/search", self.base_url))
            .header("x-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ScoutError::Network(e.to_string()))?;
        let resp = check_status(resp)?;
        resp.json::<wire::SearchResponse>()
            .await
            .map_err(|e| ScoutError::Data(e.to_string()))
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
        company.description = result.summary.clone();
        company.relevance = result.score;
        company.sources = vec![Self::KEY.to_string()];
        if let Some(published) = &result.published_date
            && let Ok(at) = published.parse::<DateTime<Utc>>()
        {
            company.last_refreshed = at;
        }
        Some(company)
    }

    /// Map raw page results to companies, keeping the first (best-scored)
    /// page per root domain.
    fn collect(
        results: &[wire::SearchResult],
        min_relevance: Option<f64>,
        limit: Option<usize>,
    ) -> Vec<CompanyRecord> {
        let mut seen_roots: Vec<String> = Vec::new();
        let mut companies = Vec::new();
        for result in results {
            let Some(company) = Self::to_record(result) else {
                continue;
            };
            if let (Some(floor), Some(relevance)) = (min_relevance, company.relevance)
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
            if let Some(cap) = limit
                && companies.len() >= cap
            {
                break;
            }
        }
        companies
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
impl DiscoveryProvider for ExaConnector {
    async fn discover(&self, req: &DiscoveryRequest) -> Result<Vec<CompanyRecord>, ScoutError> {
        let mut query = req.query().to_string();
        for vertical in &req.verticals {
            query.push_str(&format!(" {vertical}"));
        }
        for region in &req.regions {
            query.push_str(&format!(" {region}"));
        }
        let fetch = req.limit.map_or(DEFAULT_NUM_RESULTS, |l| l.max(10));
        let raw = self.search(&query, fetch).await?;
        Ok(Self::collect(&raw.results, req.min_relevance, req.limit))
    }
}

#[async_trait]
impl NameLookupProvider for ExaConnector {
    async fn lookup_by_name(
        &self,
        req: &NameLookupRequest,
    ) -> Result<Vec<CompanyRecord>, ScoutError> {
        let query = format!("{} official company website", req.name());
        let raw = self.search(&query, req.limit.unwrap_or(10)).await?;
        let needle = req.name().to_lowercase();
        let mut companies = Self::collect(&raw.results, None, req.limit);
        for company in &mut companies {
            company.exact_match = company.name.to_lowercase().contains(&needle)
                || company.domain.root().starts_with(&needle.replace(' ', ""));
        }
        if companies.is_empty() {
            return Err(ScoutError::not_found(format!("company '{}'", req.name())));
        }
        Ok(companies)
    }
}

#[async_trait]
impl EngineConnector for ExaConnector {
    fn name(&self) -> &'static str {
        Self::KEY
    }

    fn vendor(&self) -> &'static str {
        "Exa"
    }

    fn as_discovery_provider(&self) -> Option<&dyn DiscoveryProvider> {
        Some(self)
    }

    fn as_name_lookup_provider(&self) -> Option<&dyn NameLookupProvider> {
        Some(self)
    }
}
