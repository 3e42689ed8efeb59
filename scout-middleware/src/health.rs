//! Per-engine health observation.
//!
//! [`HealthRecordingConnector`] times every call and records the outcome
//! into a shared [`HealthTracker`]. The tracker classifies engines over a
//! sliding window; the router consumes the classification when ordering
//! candidates.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;

use scout_core::connector::{
    ContactEnrichmentProvider, CrmStatusProvider, DiscoveryProvider, EmailVerificationProvider,
    EngineConnector, NameLookupProvider, SignalExtractionProvider,
};
use scout_core::{
    Capability, CompanyRecord, ContactSummary, CrmStatus, DiscoveryRequest, Domain, EmailVerdict,
    HealthConfig, HealthState, Middleware, NameLookupRequest, ProviderHealth, ScoutError, Signal,
};

/// One observed call.
#[derive(Debug, Clone)]
pub struct CallSample {
    /// When the call finished, for window pruning.
    pub at: Instant,
    /// When the call finished, in wall-clock time.
    pub finished_at: DateTime<Utc>,
    /// The capability invoked.
    pub capability: Capability,
    /// Whether the call succeeded.
    pub success: bool,
    /// Wall-clock duration of the call.
    pub latency_ms: u64,
    /// HTTP status carried by the error, when there was one.
    pub status: Option<u16>,
    /// Remaining rate-limit quota, when the call revealed one. Provider
    /// responses are mapped to domain types before they reach this layer,
    /// so today only a rate-limited failure reveals the quota (as zero).
    pub rate_limit_remaining: Option<u32>,
}

/// Shared sliding-window health state for all engines.
pub struct HealthTracker {
    cfg: HealthConfig,
    samples: Mutex<HashMap<String, VecDeque<CallSample>>>,
}

impl HealthTracker {
    /// Tracker with the given thresholds and windows.
    #[must_use]
    pub fn new(cfg: HealthConfig) -> Self {
        Self {
            cfg,
            samples: Mutex::new(HashMap::new()),
        }
    }

    /// Record a finished call for `engine`, pruning samples that fell out of
    /// the reporting window.
    pub fn record(&self, engine: &str, sample: CallSample) {
        let mut samples = self.samples.lock().expect("mutex poisoned");
        let queue = samples.entry(engine.to_string()).or_default();
        let horizon = self.cfg.reporting_window;
        while queue
            .front()
            .is_some_and(|s| s.at.elapsed() > horizon)
        {
            queue.pop_front();
        }
        queue.push_back(sample);
    }

    /// Classify `engine` over the routing window.
    ///
    /// An engine with no observed calls is `Healthy`: new engines must not
    /// start out deprioritized.
    #[must_use]
    pub fn state(&self, engine: &str) -> HealthState {
        self.report(engine, self.cfg.routing_window).state
    }

    /// Full health report for `engine` over an arbitrary window.
    #[must_use]
    pub fn report(&self, engine: &str, window: Duration) -> ProviderHealth {
        let samples = self.samples.lock().expect("mutex poisoned");
        let in_window: Vec<&CallSample> = samples
            .get(engine)
            .map(|q| q.iter().filter(|s| s.at.elapsed() <= window).collect())
            .unwrap_or_default();

        let total = in_window.len() as u64;
        let failed = in_window.iter().filter(|s| !s.success).count() as u64;
        #[allow(clippy::cast_precision_loss)]
        let failure_rate = if total == 0 {
            0.0
        } else {
            failed as f64 / total as f64
        };

        let avg_latency_ms = if in_window.is_empty() {
            None
        } else {
            let sum: u64 = in_window.iter().map(|s| s.latency_ms).sum();
            Some(sum / total)
        };
        let last_success = in_window
            .iter()
            .filter(|s| s.success)
            .map(|s| s.finished_at)
            .max();
        let rate_limit_remaining = in_window
            .iter()
            .rev()
            .find_map(|s| s.rate_limit_remaining);

        let state = if total == 0 || failure_rate < self.cfg.degraded_threshold {
            HealthState::Healthy
        } else if failure_rate < self.cfg.down_threshold {
            HealthState::Degraded
        } else {
            HealthState::Down
        };

        ProviderHealth {
            engine: engine.to_string(),
            state,
            total_calls: total,
            failed_calls: failed,
            failure_rate,
            avg_latency_ms,
            last_success,
            rate_limit_remaining,
            window_secs: window.as_secs(),
        }
    }
}

/// Wrapper that records an outcome sample for every call.
pub struct HealthRecordingConnector {
    inner: Arc<dyn EngineConnector>,
    tracker: Arc<HealthTracker>,
}

#[scout_macros::delegate_connector(inner)]
impl HealthRecordingConnector {
    /// Wrap `inner`, recording into `tracker`.
    #[must_use]
    pub fn new(inner: Arc<dyn EngineConnector>, tracker: Arc<HealthTracker>) -> Self {
        Self { inner, tracker }
    }

    fn observe<T>(
        &self,
        capability: Capability,
        started: Instant,
        result: &Result<T, ScoutError>,
    ) {
        let (status, rate_limit_remaining) = match result {
            Ok(_) => (None, None),
            Err(ScoutError::Http { status } | ScoutError::AuthFailed { status }) => {
                (Some(*status), None)
            }
            // A rate-limited failure means the quota is spent.
            Err(ScoutError::RateLimited { .. }) => (Some(429), Some(0)),
            Err(_) => (None, None),
        };
        self.tracker.record(
            self.inner.name(),
            CallSample {
                at: Instant::now(),
                finished_at: Utc::now(),
                capability,
                success: result.is_ok(),
                latency_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                status,
                rate_limit_remaining,
            },
        );
    }
}

#[async_trait]
impl DiscoveryProvider for HealthRecordingConnector {
    async fn discover(&self, req: &DiscoveryRequest) -> Result<Vec<CompanyRecord>, ScoutError> {
        let inner = self
            .inner
            .as_discovery_provider()
            .ok_or_else(|| ScoutError::unsupported(Capability::Discovery))?;
        let started = Instant::now();
        let result = inner.discover(req).await;
        self.observe(Capability::Discovery, started, &result);
        result
    }
}

#[async_trait]
impl NameLookupProvider for HealthRecordingConnector {
    async fn lookup_by_name(
        &self,
        req: &NameLookupRequest,
    ) -> Result<Vec<CompanyRecord>, ScoutError> {
        let inner = self
            .inner
            .as_name_lookup_provider()
            .ok_or_else(|| ScoutError::unsupported(Capability::NameLookup))?;
        let started = Instant::now();
        let result = inner.lookup_by_name(req).await;
        self.observe(Capability::NameLookup, started, &result);
        result
    }
}

#[async_trait]
impl ContactEnrichmentProvider for HealthRecordingConnector {
    async fn enrich_contacts(&self, domain: &Domain) -> Result<ContactSummary, ScoutError> {
        let inner = self
            .inner
            .as_contact_enrichment_provider()
            .ok_or_else(|| ScoutError::unsupported(Capability::ContactEnrichment))?;
        let started = Instant::now();
        let result = inner.enrich_contacts(domain).await;
        self.observe(Capability::ContactEnrichment, started, &result);
        result
    }
}

#[async_trait]
impl EmailVerificationProvider for HealthRecordingConnector {
    async fn verify_email(&self, email: &str) -> Result<EmailVerdict, ScoutError> {
        let inner = self
            .inner
            .as_email_verification_provider()
            .ok_or_else(|| ScoutError::unsupported(Capability::EmailVerification))?;
        let started = Instant::now();
        let result = inner.verify_email(email).await;
        self.observe(Capability::EmailVerification, started, &result);
        result
    }
}

#[async_trait]
impl CrmStatusProvider for HealthRecordingConnector {
    async fn crm_status(&self, domain: &Domain) -> Result<CrmStatus, ScoutError> {
        let inner = self
            .inner
            .as_crm_status_provider()
            .ok_or_else(|| ScoutError::unsupported(Capability::CrmStatus))?;
        let started = Instant::now();
        let result = inner.crm_status(domain).await;
        self.observe(Capability::CrmStatus, started, &result);
        result
    }
}

#[async_trait]
impl SignalExtractionProvider for HealthRecordingConnector {
    async fn extract_signals(
        &self,
        domain: &Domain,
        corpus: &str,
    ) -> Result<Vec<Signal>, ScoutError> {
        let inner = self
            .inner
            .as_signal_extraction_provider()
            .ok_or_else(|| ScoutError::unsupported(Capability::SignalExtraction))?;
        let started = Instant::now();
        let result = inner.extract_signals(domain, corpus).await;
        self.observe(Capability::SignalExtraction, started, &result);
        result
    }
}

/// [`Middleware`] factory for [`HealthRecordingConnector`].
pub struct HealthMiddleware {
    tracker: Arc<HealthTracker>,
}

impl HealthMiddleware {
    /// Health layer recording into the given shared tracker.
    #[must_use]
    pub fn new(tracker: Arc<HealthTracker>) -> Self {
        Self { tracker }
    }
}

impl Middleware for HealthMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn EngineConnector>) -> Arc<dyn EngineConnector> {
        Arc::new(HealthRecordingConnector::new(inner, self.tracker))
    }

    fn name(&self) -> &'static str {
        "HealthRecordingConnector"
    }

    fn config_json(&self) -> serde_json::Value {
        json!({ "shared_tracker": true })
    }
}
