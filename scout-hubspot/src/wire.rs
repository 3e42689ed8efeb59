//! Wire types for the HubSpot CRM v3 search API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct CompanySearchBody {
    #[serde(rename = "filterGroups")]
    pub filter_groups: Vec<FilterGroup>,
    pub properties: Vec<&'static str>,
    pub limit: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct FilterGroup {
    pub filters: Vec<Filter>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Filter {
    #[serde(rename = "propertyName")]
    pub property_name: &'static str,
    pub operator: &'static str,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompanySearchResponse {
    #[serde(default)]
    pub results: Vec<CompanyResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompanyResult {
    pub properties: CompanyProperties,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompanyProperties {
    pub lifecyclestage: Option<String>,
    pub hubspot_owner_id: Option<String>,
    pub notes_last_updated: Option<String>,
}
