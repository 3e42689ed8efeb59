#![allow(dead_code)]
#![allow(clippy::type_complexity)]

use std::sync::Arc;

use async_trait::async_trait;
use scout_core::{
    CompanyRecord, ContactSummary, CrmStatus, DiscoveryRequest, Domain, EmailVerdict,
    NameLookupRequest, ScoutError, Signal,
    connector::{
        ContactEnrichmentProvider, CrmStatusProvider, DiscoveryProvider,
        EmailVerificationProvider, EngineConnector, NameLookupProvider, SignalExtractionProvider,
    },
};
use tokio::time::{Duration, sleep};

/// Simple in-memory engine used by integration tests.
///
/// A capability is advertised exactly when its closure is set, so tests
/// compose engines with precisely the surface they need.
pub struct MockConnector {
    pub name: &'static str,
    pub delay_ms: u64,

    // Optional closures to customize behavior per test
    pub discover_fn:
        Option<Arc<dyn Fn(&DiscoveryRequest) -> Result<Vec<CompanyRecord>, ScoutError> + Send + Sync>>,
    pub lookup_fn: Option<
        Arc<dyn Fn(&NameLookupRequest) -> Result<Vec<CompanyRecord>, ScoutError> + Send + Sync>,
    >,
    pub contacts_fn:
        Option<Arc<dyn Fn(&Domain) -> Result<ContactSummary, ScoutError> + Send + Sync>>,
    pub verify_fn: Option<Arc<dyn Fn(&str) -> Result<EmailVerdict, ScoutError> + Send + Sync>>,
    pub crm_fn: Option<Arc<dyn Fn(&Domain) -> Result<CrmStatus, ScoutError> + Send + Sync>>,
    pub signals_fn:
        Option<Arc<dyn Fn(&Domain, &str) -> Result<Vec<Signal>, ScoutError> + Send + Sync>>,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self {
            name: "default_mock",
            delay_ms: 0,

            discover_fn: None,
            lookup_fn: None,
            contacts_fn: None,
            verify_fn: None,
            crm_fn: None,
            signals_fn: None,
        }
    }
}

impl MockConnector {
    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }
}

#[async_trait]
impl DiscoveryProvider for MockConnector {
    async fn discover(&self, req: &DiscoveryRequest) -> Result<Vec<CompanyRecord>, ScoutError> {
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        match &self.discover_fn {
            Some(f) => (f)(req),
            None => Err(ScoutError::unsupported("discovery")),
        }
    }
}

#[async_trait]
impl NameLookupProvider for MockConnector {
    async fn lookup_by_name(
        &self,
        req: &NameLookupRequest,
    ) -> Result<Vec<CompanyRecord>, ScoutError> {
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        match &self.lookup_fn {
            Some(f) => (f)(req),
            None => Err(ScoutError::unsupported("name_lookup")),
        }
    }
}

#[async_trait]
impl ContactEnrichmentProvider for MockConnector {
    async fn enrich_contacts(&self, domain: &Domain) -> Result<ContactSummary, ScoutError> {
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        match &self.contacts_fn {
            Some(f) => (f)(domain),
            None => Err(ScoutError::unsupported("contact_enrichment")),
        }
    }
}

#[async_trait]
impl EmailVerificationProvider for MockConnector {
    async fn verify_email(&self, email: &str) -> Result<EmailVerdict, ScoutError> {
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        match &self.verify_fn {
            Some(f) => (f)(email),
            None => Err(ScoutError::unsupported("email_verification")),
        }
    }
}

#[async_trait]
impl CrmStatusProvider for MockConnector {
    async fn crm_status(&self, domain: &Domain) -> Result<CrmStatus, ScoutError> {
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        match &self.crm_fn {
            Some(f) => (f)(domain),
            None => Err(ScoutError::unsupported("crm_status")),
        }
    }
}

#[async_trait]
impl SignalExtractionProvider for MockConnector {
    async fn extract_signals(
        &self,
        domain: &Domain,
        corpus: &str,
    ) -> Result<Vec<Signal>, ScoutError> {
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        match &self.signals_fn {
            Some(f) => (f)(domain, corpus),
            None => Err(ScoutError::unsupported("signal_extraction")),
        }
    }
}

#[async_trait]
impl EngineConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "Test"
    }

    fn as_discovery_provider(&self) -> Option<&dyn DiscoveryProvider> {
        if self.discover_fn.is_some() {
            Some(self as &dyn DiscoveryProvider)
        } else {
            None
        }
    }

    fn as_name_lookup_provider(&self) -> Option<&dyn NameLookupProvider> {
        if self.lookup_fn.is_some() {
            Some(self as &dyn NameLookupProvider)
        } else {
            None
        }
    }

    fn as_contact_enrichment_provider(&self) -> Option<&dyn ContactEnrichmentProvider> {
        if self.contacts_fn.is_some() {
            Some(self as &dyn ContactEnrichmentProvider)
        } else {
            None
        }
    }

    fn as_email_verification_provider(&self) -> Option<&dyn EmailVerificationProvider> {
        if self.verify_fn.is_some() {
            Some(self as &dyn EmailVerificationProvider)
        } else {
            None
        }
    }

    fn as_crm_status_provider(&self) -> Option<&dyn CrmStatusProvider> {
        if self.crm_fn.is_some() {
            Some(self as &dyn CrmStatusProvider)
        } else {
            None
        }
    }

    fn as_signal_extraction_provider(&self) -> Option<&dyn SignalExtractionProvider> {
        if self.signals_fn.is_some() {
            Some(self as &dyn SignalExtractionProvider)
        } else {
            None
        }
    }
}
