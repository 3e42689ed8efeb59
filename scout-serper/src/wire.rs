//! Wire types for the Serper search API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct SearchBody<'a> {
    pub q: &'a str,
    pub num: usize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub organic: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrganicResult {
    pub title: Option<String>,
    pub link: String,
    pub snippet: Option<String>,
    pub position: Option<u32>,
}
