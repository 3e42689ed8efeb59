//! Deterministic in-memory engines for tests and examples.
//!
//! [`MockEngine`] serves every capability from a fixed fixture set and
//! recognizes magic markers in inputs to simulate failures:
//!
//! - a query containing `"FAIL"` fails with an engine error;
//! - `"RATE_LIMIT"` fails with a rate limit;
//! - `"AUTH"` fails with an authentication failure;
//! - `"TIMEOUT"` hangs forever (pair with a timeout layer or deadline).
//!
//! [`dynamic::DynamicMockEngine`] defers behavior to an external controller
//! instead, for tests that need to change behavior mid-flight.

pub mod dynamic;
pub mod fixtures;

use async_trait::async_trait;
use chrono::Utc;

use scout_core::connector::{
    ContactEnrichmentProvider, CrmStatusProvider, DiscoveryProvider, EmailVerificationProvider,
    EngineConnector, NameLookupProvider, SignalExtractionProvider,
};
use scout_core::{
    CompanyRecord, ContactSummary, CrmStanding, CrmStatus, DiscoveryRequest, Domain, EmailOutcome,
    EmailVerdict, NameLookupRequest, ScoutError, Signal, SignalKind,
};

/// A fixture-backed engine serving every capability.
pub struct MockEngine {
    name: &'static str,
    companies: Vec<CompanyRecord>,
}

impl MockEngine {
    /// Engine named `name`, serving the default fixture companies.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            companies: fixtures::companies(),
        }
    }

    /// Engine named `name`, serving the given companies.
    #[must_use]
    pub fn with_companies(name: &'static str, companies: Vec<CompanyRecord>) -> Self {
        Self { name, companies }
    }

    async fn check_markers(&self, input: &str) -> Result<(), ScoutError> {
        if input.contains("TIMEOUT") {
            std::future::pending::<()>().await;
            unreachable!()
        }
        if input.contains("RATE_LIMIT") {
            return Err(ScoutError::RateLimited { retry_after_ms: 0 });
        }
        if input.contains("AUTH") {
            return Err(ScoutError::AuthFailed { status: 401 });
        }
        if input.contains("FAIL") {
            return Err(ScoutError::engine(self.name, "simulated failure"));
        }
        Ok(())
    }

    fn stamped(&self, mut company: CompanyRecord) -> CompanyRecord {
        company.sources = vec![self.name.to_string()];
        company.last_refreshed = Utc::now();
        company
    }
}

#[async_trait]
impl EngineConnector for MockEngine {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_discovery_provider(&self) -> Option<&dyn DiscoveryProvider> {
        Some(self)
    }

    fn as_name_lookup_provider(&self) -> Option<&dyn NameLookupProvider> {
        Some(self)
    }

    fn as_contact_enrichment_provider(&self) -> Option<&dyn ContactEnrichmentProvider> {
        Some(self)
    }

    fn as_email_verification_provider(&self) -> Option<&dyn EmailVerificationProvider> {
        Some(self)
    }

    fn as_crm_status_provider(&self) -> Option<&dyn CrmStatusProvider> {
        Some(self)
    }

    fn as_signal_extraction_provider(&self) -> Option<&dyn SignalExtractionProvider> {
        Some(self)
    }
}

#[async_trait]
impl DiscoveryProvider for MockEngine {
    async fn discover(&self, req: &DiscoveryRequest) -> Result<Vec<CompanyRecord>, ScoutError> {
        self.check_markers(req.query()).await?;
        let mut results: Vec<CompanyRecord> = self
            .companies
            .iter()
            .cloned()
            .map(|c| self.stamped(c))
            .collect();
        if let Some(limit) = req.limit {
            results.truncate(limit);
        }
        Ok(results)
    }
}

#[async_trait]
impl NameLookupProvider for MockEngine {
    async fn lookup_by_name(
        &self,
        req: &NameLookupRequest,
    ) -> Result<Vec<CompanyRecord>, ScoutError> {
        self.check_markers(req.name()).await?;
        let needle = req.name().to_lowercase();
        let mut results: Vec<CompanyRecord> = self
            .companies
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .cloned()
            .map(|c| {
                let mut c = self.stamped(c);
                c.exact_match = c.name.to_lowercase() == needle;
                c
            })
            .collect();
        if let Some(limit) = req.limit {
            results.truncate(limit);
        }
        if results.is_empty() {
            return Err(ScoutError::not_found(format!("company '{}'", req.name())));
        }
        Ok(results)
    }
}

#[async_trait]
impl ContactEnrichmentProvider for MockEngine {
    async fn enrich_contacts(&self, domain: &Domain) -> Result<ContactSummary, ScoutError> {
        self.check_markers(domain.as_str()).await?;
        Ok(ContactSummary {
            domain: domain.clone(),
            total: 12,
            titles: vec!["VP Sales".into(), "Head of Growth".into()],
            sample_emails: vec![format!("pat@{domain}")],
        })
    }
}

#[async_trait]
impl EmailVerificationProvider for MockEngine {
    async fn verify_email(&self, email: &str) -> Result<EmailVerdict, ScoutError> {
        self.check_markers(email).await?;
        let outcome = if email.ends_with(".invalid") {
            EmailOutcome::Undeliverable
        } else {
            EmailOutcome::Deliverable
        };
        Ok(EmailVerdict {
            email: email.to_string(),
            outcome,
            confidence: Some(0.97),
        })
    }
}

#[async_trait]
impl CrmStatusProvider for MockEngine {
    async fn crm_status(&self, domain: &Domain) -> Result<CrmStatus, ScoutError> {
        self.check_markers(domain.as_str()).await?;
        let standing = match self
            .companies
            .iter()
            .find(|c| c.domain.root() == domain.root())
        {
            Some(_) => CrmStanding::ActiveLead,
            None => return Ok(CrmStatus::not_tracked()),
        };
        Ok(CrmStatus {
            standing,
            owner: Some("mock-owner".into()),
            last_activity: Some(Utc::now()),
        })
    }
}

#[async_trait]
impl SignalExtractionProvider for MockEngine {
    async fn extract_signals(
        &self,
        domain: &Domain,
        corpus: &str,
    ) -> Result<Vec<Signal>, ScoutError> {
        self.check_markers(corpus).await?;
        let mut signals = Vec::new();
        if corpus.to_lowercase().contains("hiring") {
            signals.push(Signal {
                id: format!("{domain}:hiring"),
                kind: SignalKind::Hiring,
                title: "Hiring across go-to-market".into(),
                summary: None,
                url: None,
                source: self.name.to_string(),
                observed_at: Utc::now(),
            });
        }
        if corpus.to_lowercase().contains("funding") || corpus.to_lowercase().contains("raised") {
            signals.push(Signal {
                id: format!("{domain}:funding"),
                kind: SignalKind::Funding,
                title: "Recently raised funding".into(),
                summary: None,
                url: None,
                source: self.name.to_string(),
                observed_at: Utc::now(),
            });
        }
        Ok(signals)
    }
}
