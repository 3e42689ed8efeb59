//! Engine connector for the Apollo.io B2B data API.
//!
//! Serves contact enrichment (people search scoped to a company domain),
//! email verification, and company lookup by name. Apollo is the only
//! engine in the default set that knows firmographics (headcount, founding
//! year, phone), so its lookup results backfill fields the search engines
//! cannot supply.

mod builder;
mod wire;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use scout_core::connector::{
    ContactEnrichmentProvider, EmailVerificationProvider, EngineConnector, NameLookupProvider,
};
use scout_core::{
    CompanyRecord, ContactSummary, Domain, EmailOutcome, EmailVerdict, NameLookupRequest,
    ScoutError,
};

pub use builder::ApolloConnectorBuilder;

const DEFAULT_BASE_URL: &str = "https://api.apollo.io";
const CONTACT_SAMPLE_SIZE: usize = 10;

/// Connector backed by the Apollo.io REST API.
pub struct ApolloConnector {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl ApolloConnector {
    /// Engine key used in routing policies and budget configuration.
    pub const KEY: &'static str = "apollo";

    /// Start building a connector.
    #[must_use]
    pub fn builder() -> ApolloConnectorBuilder {
        ApolloConnectorBuilder::default()
    }

    async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ScoutError> {
        let resp = self
            .client
            .post(format!("{}{path}", self.base_url))
            .header("X-Api-Key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| ScoutError::Network(e.to_string()))?;
        check_status(resp)?
            .json()
            .await
            .map_err(|e| ScoutError::Data(e.to_string()))
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

fn outcome_from_status(status: Option<&str>) -> EmailOutcome {
    match status {
        Some("verified" | "deliverable" | "valid") => EmailOutcome::Deliverable,
        Some("undeliverable" | "invalid" | "bounced") => EmailOutcome::Undeliverable,
        Some("accept_all" | "catch_all" | "risky") => EmailOutcome::Risky,
        _ => EmailOutcome::Unknown,
    }
}

#[async_trait]
impl ContactEnrichmentProvider for ApolloConnector {
    async fn enrich_contacts(&self, domain: &Domain) -> Result<ContactSummary, ScoutError> {
        let body = wire::PeopleSearchBody {
            q_organization_domains: domain.as_str(),
            page: 1,
            per_page: CONTACT_SAMPLE_SIZE,
        };
        let raw: wire::PeopleSearchResponse = self.post("/v1/mixed_people/search", &body).await?;

        let total = raw
            .pagination
            .and_then(|p| p.total_entries)
            .unwrap_or_else(|| raw.people.len() as u32);
        let mut titles = Vec::new();
        let mut sample_emails = Vec::new();
        for person in &raw.people {
            if let Some(title) = &person.title
                && !titles.contains(title)
            {
                titles.push(title.clone());
            }
            if let Some(email) = &person.email {
                sample_emails.push(email.clone());
            }
        }
        Ok(ContactSummary {
            domain: domain.clone(),
            total,
            titles,
            sample_emails,
        })
    }
}

#[async_trait]
impl EmailVerificationProvider for ApolloConnector {
    async fn verify_email(&self, email: &str) -> Result<EmailVerdict, ScoutError> {
        if !email.contains('@') {
            return Err(ScoutError::invalid_arg(format!(
                "not an email address: {email}"
            )));
        }
        let raw: wire::EmailVerifyResponse = self
            .post("/v1/emails/verify", &wire::EmailVerifyBody { email })
            .await?;
        Ok(EmailVerdict {
            email: email.to_string(),
            outcome: outcome_from_status(raw.status.as_deref()),
            confidence: raw.confidence,
        })
    }
}

#[async_trait]
impl NameLookupProvider for ApolloConnector {
    async fn lookup_by_name(
        &self,
        req: &NameLookupRequest,
    ) -> Result<Vec<CompanyRecord>, ScoutError> {
        let body = wire::CompanySearchBody {
            q_organization_name: req.name(),
            per_page: req.limit.unwrap_or(10),
        };
        let raw: wire::CompanySearchResponse =
            self.post("/v1/mixed_companies/search", &body).await?;

        let needle = req.name().to_lowercase();
        let mut companies = Vec::new();
        for org in &raw.organizations {
            let Some(domain) = org
                .primary_domain
                .as_deref()
                .and_then(|d| Domain::parse(d).ok())
            else {
                continue;
            };
            let name = org
                .name
                .clone()
                .unwrap_or_else(|| domain.root().to_string());
            let mut company = CompanyRecord::new(name, domain);
            company.vertical = org.industry.clone();
            company.region = org.country.clone();
            company.employee_count = org.estimated_num_employees;
            company.founded_year = org.founded_year;
            company.phone = org.phone.clone();
            company.logo_url = org.logo_url.clone();
            company.exact_match = company.name.to_lowercase() == needle;
            company.sources = vec![Self::KEY.to_string()];
            companies.push(company);
        }
        if companies.is_empty() {
            return Err(ScoutError::not_found(format!("company '{}'", req.name())));
        }
        Ok(companies)
    }
}

#[async_trait]
impl EngineConnector for ApolloConnector {
    fn name(&self) -> &'static str {
        Self::KEY
    }

    fn vendor(&self) -> &'static str {
        "Apollo.io"
    }

    fn as_contact_enrichment_provider(&self) -> Option<&dyn ContactEnrichmentProvider> {
        Some(self)
    }

    fn as_email_verification_provider(&self) -> Option<&dyn EmailVerificationProvider> {
        Some(self)
    }

    fn as_name_lookup_provider(&self) -> Option<&dyn NameLookupProvider> {
        Some(self)
    }
}
