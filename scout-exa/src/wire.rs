//! Wire types for the Exa search API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct SearchBody<'a> {
    pub query: &'a str,
    #[serde(rename = "numResults")]
    pub num_results: usize,
    #[serde(rename = "type")]
    pub search_type: &'a str,
    pub contents: ContentsSpec,
}

#[derive(Debug, Serialize)]
pub(crate) struct ContentsSpec {
    pub summary: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResult {
    pub title: Option<String>,
    pub url: String,
    pub score: Option<f64>,
    pub summary: Option<String>,
    #[serde(rename = "publishedDate")]
    pub published_date: Option<String>,
}
