//! Per-call timeout and retry.
//!
//! Every attempt is bounded by the call timeout, and retryable failures are
//! re-attempted with exponential backoff per [`scout_core::resilience`].
//! The budget layer sits inside this one so each attempt is charged; the
//! health layer sits outside so a retried call yields one outcome sample.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use scout_core::connector::{
    ContactEnrichmentProvider, CrmStatusProvider, DiscoveryProvider, EmailVerificationProvider,
    EngineConnector, NameLookupProvider, SignalExtractionProvider,
};
use scout_core::resilience::{with_retry, with_timeout};
use scout_core::{
    Capability, CompanyRecord, ContactSummary, CrmStatus, DiscoveryRequest, Domain, EmailVerdict,
    Middleware, NameLookupRequest, RetryConfig, ScoutError, Signal,
};

/// Wrapper applying per-attempt timeouts and retry with backoff.
pub struct ResilientConnector {
    inner: Arc<dyn EngineConnector>,
    retry: RetryConfig,
    call_timeout: Duration,
}

#[scout_macros::delegate_connector(inner)]
impl ResilientConnector {
    /// Wrap `inner` with the given retry policy and per-attempt timeout.
    #[must_use]
    pub fn new(inner: Arc<dyn EngineConnector>, retry: RetryConfig, call_timeout: Duration) -> Self {
        Self {
            inner,
            retry,
            call_timeout,
        }
    }

    fn label(&self, capability: Capability) -> String {
        format!("{} {capability}", self.inner.name())
    }
}

#[async_trait]
impl DiscoveryProvider for ResilientConnector {
    async fn discover(&self, req: &DiscoveryRequest) -> Result<Vec<CompanyRecord>, ScoutError> {
        let label = self.label(Capability::Discovery);
        with_retry(&self.retry, || {
            with_timeout(&label, self.call_timeout, async {
                let inner = self
                    .inner
                    .as_discovery_provider()
                    .ok_or_else(|| ScoutError::unsupported(Capability::Discovery))?;
                inner.discover(req).await
            })
        })
        .await
    }
}

#[async_trait]
impl NameLookupProvider for ResilientConnector {
    async fn lookup_by_name(
        &self,
        req: &NameLookupRequest,
    ) -> Result<Vec<CompanyRecord>, ScoutError> {
        let label = self.label(Capability::NameLookup);
        with_retry(&self.retry, || {
            with_timeout(&label, self.call_timeout, async {
                let inner = self
                    .inner
                    .as_name_lookup_provider()
                    .ok_or_else(|| ScoutError::unsupported(Capability::NameLookup))?;
                inner.lookup_by_name(req).await
            })
        })
        .await
    }
}

#[async_trait]
impl ContactEnrichmentProvider for ResilientConnector {
    async fn enrich_contacts(&self, domain: &Domain) -> Result<ContactSummary, ScoutError> {
        let label = self.label(Capability::ContactEnrichment);
        with_retry(&self.retry, || {
            with_timeout(&label, self.call_timeout, async {
                let inner = self
                    .inner
                    .as_contact_enrichment_provider()
                    .ok_or_else(|| ScoutError::unsupported(Capability::ContactEnrichment))?;
                inner.enrich_contacts(domain).await
            })
        })
        .await
    }
}

#[async_trait]
impl EmailVerificationProvider for ResilientConnector {
    async fn verify_email(&self, email: &str) -> Result<EmailVerdict, ScoutError> {
        let label = self.label(Capability::EmailVerification);
        with_retry(&self.retry, || {
            with_timeout(&label, self.call_timeout, async {
                let inner = self
                    .inner
                    .as_email_verification_provider()
                    .ok_or_else(|| ScoutError::unsupported(Capability::EmailVerification))?;
                inner.verify_email(email).await
            })
        })
        .await
    }
}

#[async_trait]
impl CrmStatusProvider for ResilientConnector {
    async fn crm_status(&self, domain: &Domain) -> Result<CrmStatus, ScoutError> {
        let label = self.label(Capability::CrmStatus);
        with_retry(&self.retry, || {
            with_timeout(&label, self.call_timeout, async {
                let inner = self
                    .inner
                    .as_crm_status_provider()
                    .ok_or_else(|| ScoutError::unsupported(Capability::CrmStatus))?;
                inner.crm_status(domain).await
            })
        })
        .await
    }
}

#[async_trait]
impl SignalExtractionProvider for ResilientConnector {
    async fn extract_signals(
        &self,
        domain: &Domain,
        corpus: &str,
    ) -> Result<Vec<Signal>, ScoutError> {
        let label = self.label(Capability::SignalExtraction);
        with_retry(&self.retry, || {
            with_timeout(&label, self.call_timeout, async {
                let inner = self
                    .inner
                    .as_signal_extraction_provider()
                    .ok_or_else(|| ScoutError::unsupported(Capability::SignalExtraction))?;
                inner.extract_signals(domain, corpus).await
            })
        })
        .await
    }
}

/// [`Middleware`] factory for [`ResilientConnector`].
pub struct ResilienceMiddleware {
    retry: RetryConfig,
    call_timeout: Duration,
}

impl ResilienceMiddleware {
    /// Resilience layer with the given retry policy and per-attempt timeout.
    #[must_use]
    pub const fn new(retry: RetryConfig, call_timeout: Duration) -> Self {
        Self {
            retry,
            call_timeout,
        }
    }
}

impl Middleware for ResilienceMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn EngineConnector>) -> Arc<dyn EngineConnector> {
        Arc::new(ResilientConnector::new(inner, self.retry, self.call_timeout))
    }

    fn name(&self) -> &'static str {
        "ResilientConnector"
    }

    fn config_json(&self) -> serde_json::Value {
        json!({
            "max_retries": self.retry.max_retries,
            "base_delay_ms": u64::try_from(self.retry.base_delay.as_millis()).unwrap_or(u64::MAX),
            "max_delay_ms": u64::try_from(self.retry.max_delay.as_millis()).unwrap_or(u64::MAX),
            "jitter_percent": self.retry.jitter_percent,
            "call_timeout_ms": u64::try_from(self.call_timeout.as_millis()).unwrap_or(u64::MAX),
        })
    }
}
