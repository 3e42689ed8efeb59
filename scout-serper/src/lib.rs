//! Engine connector for the Serper Google-search API.
//!
//! Serves discovery and name lookup from organic Google results. Serper does
//! not report a relevance score, so the adapter derives one from the organic
//! position (`1 / position`), which keeps its results comparable to the
//! neural engines during merge.

mod builder;
mod wire;

use async_trait::async_trait;

use scout_core::connector::{DiscoveryProvider, EngineConnector, NameLookupProvider};
use scout_core::domain::is_noise_domain;
use scout_core::{CompanyRecord, DiscoveryRequest, Domain, NameLookupRequest, ScoutError};

pub use builder::SerperConnectorBuilder;

const DEFAULT_BASE_URL: &str = "https://google.serper.dev";
const DEFAULT_NUM: usize = 20;

/// Connector backed by the Serper `/search` endpoint.
pub struct SerperConnector {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SerperConnector {
    /// Engine key used in routing policies and budget configuration.
    pub const KEY: &'static str = "serper";

    /// Start building a connector.
    #[must_use]
    pub fn builder() -> SerperConnectorBuilder {
        SerperConnectorBuilder::default()
    }

    async fn search(&self, query: &str, num: usize) -> Result<wire::SearchResponse, ScoutError> {
        let resp = self
            .client
            .post(format!("{}/search", self.base_url))
            .header("X-API-KEY", &self.api_key)
            .json(&wire::SearchBody { q: query, num })
            .send()
            .await
            .map_err(|e| ScoutError::Network(e.to_string()))?;
        check_status(resp)?
            .json()
            .await
            .map_err(|e| ScoutError::Data(e.to_string()))
    }

    fn to_record(result: &wire::OrganicResult) -> Option<CompanyRecord> {
        let host = url::Url::parse(&result.link).ok()?.host_str()?.to_string();
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
        company.description = result.snippet.clone();
        company.relevance = result.position.map(|p| 1.0 / f64::from(p.max(1)));
        company.sources = vec![Self::KEY.to_string()];
        Some(company)
    }

    fn collect(
        results: &[wire::OrganicResult],
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
impl DiscoveryProvider for SerperConnector {
    async fn discover(&self, req: &DiscoveryRequest) -> Result<Vec<CompanyRecord>, ScoutError> {
        let mut query = req.query().to_string();
        for vertical in &req.verticals {
            query.push_str(&format!(" {vertical}"));
        }
        for region in &req.regions {
            query.push_str(&format!(" {region}"));
        }
        let raw = self
            .search(&query, req.limit.map_or(DEFAULT_NUM, |l| l.max(10)))
            .await?;
        Ok(Self::collect(&raw.organic, req.min_relevance, req.limit))
    }
}

#[async_trait]
impl NameLookupProvider for SerperConnector {
    async fn lookup_by_name(
        &self,
        req: &NameLookupRequest,
    ) -> Result<Vec<CompanyRecord>, ScoutError> {
        let raw = self
            .search(
                &format!("\"{}\" official site", req.name()),
                req.limit.unwrap_or(10),
            )
            .await?;
        let needle = req.name().to_lowercase();
        let mut companies = Self::collect(&raw.organic, None, req.limit);
        for company in &mut companies {
            company.exact_match = company.name.to_lowercase().contains(&needle);
        }
        if companies.is_empty() {
            return Err(ScoutError::not_found(format!("company '{}'", req.name())));
        }
        Ok(companies)
    }
}

#[async_trait]
impl EngineConnector for SerperConnector {
    fn name(&self) -> &'static str {
        Self::KEY
    }

    fn vendor(&self) -> &'static str {
        "Serper"
    }

    fn as_discovery_provider(&self) -> Option<&dyn DiscoveryProvider> {
        Some(self)
    }

    fn as_name_lookup_provider(&self) -> Option<&dyn NameLookupProvider> {
        Some(self)
    }
}
