//! Wire types for the Tavily search API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct SearchBody<'a> {
    pub query: &'a str,
    pub max_results: usize,
    pub search_depth: &'a str,
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
    pub content: Option<String>,
    pub score: Option<f64>,
}
