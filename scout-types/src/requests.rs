use serde::{Deserialize, Serialize};

use crate::domain::Domain;
use crate::error::ScoutError;
use crate::records::SizeBucket;

/// A free-text company discovery request.
///
/// Constructed via [`DiscoveryRequest::new`], which validates the query up
/// front so engines never see an empty search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryRequest {
    query: String,
    /// Maximum number of companies in the final report.
    pub limit: Option<usize>,
    /// Restrict to these verticals (free text, matched case-insensitively).
    pub verticals: Vec<String>,
    /// Restrict to these regions.
    pub regions: Vec<String>,
    /// Restrict to this headcount bucket.
    pub size: Option<SizeBucket>,
    /// Domains to drop from results (competitors, existing customers, ...).
    pub exclude_domains: Vec<Domain>,
    /// Drop results whose provider relevance falls below this threshold.
    pub min_relevance: Option<f64>,
}

impl DiscoveryRequest {
    /// Create a request for the given query.
    ///
    /// # Errors
    /// Returns [`ScoutError::InvalidArg`] when the query is empty or
    /// whitespace-only.
    pub fn new(query: impl Into<String>) -> Result<Self, ScoutError> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(ScoutError::invalid_arg("discovery query must not be empty"));
        }
        Ok(Self {
            query,
            limit: None,
            verticals: Vec::new(),
            regions: Vec::new(),
            size: None,
            exclude_domains: Vec::new(),
            min_relevance: None,
        })
    }

    /// The validated query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Set a result cap.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Add a vertical filter.
    #[must_use]
    pub fn with_vertical(mut self, vertical: impl Into<String>) -> Self {
        self.verticals.push(vertical.into());
        self
    }

    /// Add a region filter.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.regions.push(region.into());
        self
    }

    /// Restrict to a headcount bucket.
    #[must_use]
    pub const fn with_size(mut self, size: SizeBucket) -> Self {
        self.size = Some(size);
        self
    }

    /// Exclude a domain from results.
    #[must_use]
    pub fn exclude(mut self, domain: Domain) -> Self {
        self.exclude_domains.push(domain);
        self
    }
}

/// A request to resolve a company by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameLookupRequest {
    name: String,
    /// Maximum number of candidates to return.
    pub limit: Option<usize>,
}

impl NameLookupRequest {
    /// Create a lookup request for the given company name.
    ///
    /// # Errors
    /// Returns [`ScoutError::InvalidArg`] when the name is empty or
    /// whitespace-only.
    pub fn new(name: impl Into<String>) -> Result<Self, ScoutError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ScoutError::invalid_arg("company name must not be empty"));
        }
        Ok(Self { name, limit: None })
    }

    /// The validated company name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set a result cap.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
