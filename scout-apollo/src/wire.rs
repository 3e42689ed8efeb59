//! Wire types for the Apollo.io API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct PeopleSearchBody<'a> {
    pub q_organization_domains: &'a str,
    pub page: u32,
    pub per_page: usize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PeopleSearchResponse {
    #[serde(default)]
    pub people: Vec<Person>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Person {
    pub title: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Pagination {
    pub total_entries: Option<u32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EmailVerifyBody<'a> {
    pub email: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmailVerifyResponse {
    pub status: Option<String>,
    pub confidence: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CompanySearchBody<'a> {
    pub q_organization_name: &'a str,
    pub per_page: usize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompanySearchResponse {
    #[serde(default)]
    pub organizations: Vec<Organization>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Organization {
    pub name: Option<String>,
    pub primary_domain: Option<String>,
    pub industry: Option<String>,
    pub country: Option<String>,
    pub estimated_num_employees: Option<u32>,
    pub founded_year: Option<u16>,
    pub phone: Option<String>,
    pub logo_url: Option<String>,
}
