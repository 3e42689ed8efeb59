//! Engine connector for the HubSpot CRM v3 API.
//!
//! Serves CRM standing lookups: given a company domain, search the portal's
//! company objects and map the lifecycle stage onto [`CrmStanding`]. A
//! domain with no matching company is an answer, not an error, so it maps to
//! `Ok` with [`CrmStanding::NotTracked`].

mod builder;
mod wire;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use scout_core::connector::{CrmStatusProvider, EngineConnector};
use scout_core::{CrmStanding, CrmStatus, Domain, ScoutError};

pub use builder::HubspotConnectorBuilder;

const DEFAULT_BASE_URL: &str = "https://api.hubapi.com";

/// Connector backed by the HubSpot companies search endpoint.
pub struct HubspotConnector {
    client: reqwest::Client,
    access_token: String,
    base_url: String,
}

impl HubspotConnector {
    /// Engine key used in routing policies and budget configuration.
    pub const KEY: &'static str = "hubspot";

    /// Start building a connector.
    #[must_use]
    pub fn builder() -> HubspotConnectorBuilder {
        HubspotConnectorBuilder::default()
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

fn standing_from_stage(stage: Option<&str>) -> CrmStanding {
    match stage {
        Some("customer") => CrmStanding::Customer,
        Some("opportunity") => CrmStanding::OpenOpportunity,
        Some("lead" | "marketingqualifiedlead" | "salesqualifiedlead" | "subscriber") => {
            CrmStanding::ActiveLead
        }
        Some("former_customer" | "churned") => CrmStanding::Churned,
        _ => CrmStanding::NotTracked,
    }
}

#[async_trait]
impl CrmStatusProvider for HubspotConnector {
    async fn crm_status(&self, domain: &Domain) -> Result<CrmStatus, ScoutError> {
        let body = wire::CompanySearchBody {
            filter_groups: vec![wire::FilterGroup {
                filters: vec![wire::Filter {
                    property_name: "domain",
                    operator: "EQ",
                    value: domain.as_str().to_string(),
                }],
            }],
            properties: vec!["lifecyclestage", "hubspot_owner_id", "notes_last_updated"],
            limit: 1,
        };
        let resp = self
            .client
            .post(format!(
                "{}/crm/v3/objects/companies/search",
                self.base_url
            ))
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| ScoutError::Network(e.to_string()))?;
        let raw: wire::CompanySearchResponse = check_status(resp)?
            .json()
            .await
            .map_err(|e| ScoutError::Data(e.to_string()))?;

        let Some(company) = raw.results.first() else {
            return Ok(CrmStatus::not_tracked());
        };
        let props = &company.properties;
        Ok(CrmStatus {
            standing: standing_from_stage(props.lifecyclestage.as_deref()),
            owner: props.hubspot_owner_id.clone(),
            last_activity: props
                .notes_last_updated
                .as_deref()
                .and_then(|s| s.parse::<DateTime<Utc>>().ok()),
        })
    }
}

#[async_trait]
impl EngineConnector for HubspotConnector {
    fn name(&self) -> &'static str {
        Self::KEY
    }

    fn vendor(&self) -> &'static str {
        "HubSpot"
    }

    fn as_crm_status_provider(&self) -> Option<&dyn CrmStatusProvider> {
        Some(self)
    }
}
