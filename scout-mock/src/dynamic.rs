//! A mock engine driven by an external controller.
//!
//! Useful for tests that need behavior to change between calls: flip an
//! engine from healthy to failing, make a single domain hang, or inspect how
//! many calls reached the engine.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use scout_core::connector::{
    ContactEnrichmentProvider, CrmStatusProvider, DiscoveryProvider, EngineConnector,
    NameLookupProvider,
};
use scout_core::{
    Capability, CompanyRecord, ContactSummary, CrmStatus, DiscoveryRequest, Domain,
    NameLookupRequest, ScoutError,
};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(ScoutError),
    /// Hang indefinitely (simulate a stalled provider).
    Hang,
}

#[derive(Default)]
struct InternalState {
    discovery_rules: HashMap<String, MockBehavior<Vec<CompanyRecord>>>,
    lookup_rules: HashMap<String, MockBehavior<Vec<CompanyRecord>>>,
    contact_rules: HashMap<String, MockBehavior<ContactSummary>>,
    crm_rules: HashMap<String, MockBehavior<CrmStatus>>,
}

/// Controller handle used by tests to drive the dynamic mock from outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
    calls: Arc<AtomicU64>,
}

impl DynamicMockController {
    /// Set the behavior for `discover` calls with the given query.
    pub async fn set_discovery_behavior(
        &self,
        query: impl Into<String>,
        behavior: MockBehavior<Vec<CompanyRecord>>,
    ) {
        self.state
            .lock()
            .await
            .discovery_rules
            .insert(query.into(), behavior);
    }

    /// Set the behavior for `lookup_by_name` calls with the given name.
    pub async fn set_lookup_behavior(
        &self,
        name: impl Into<String>,
        behavior: MockBehavior<Vec<CompanyRecord>>,
    ) {
        self.state
            .lock()
            .await
            .lookup_rules
            .insert(name.into(), behavior);
    }

    /// Set the behavior for `enrich_contacts` calls for the given domain.
    pub async fn set_contact_behavior(
        &self,
        domain: &Domain,
        behavior: MockBehavior<ContactSummary>,
    ) {
        self.state
            .lock()
            .await
            .contact_rules
            .insert(domain.as_str().to_string(), behavior);
    }

    /// Set the behavior for `crm_status` calls for the given domain.
    pub async fn set_crm_behavior(&self, domain: &Domain, behavior: MockBehavior<CrmStatus>) {
        self.state
            .lock()
            .await
            .crm_rules
            .insert(domain.as_str().to_string(), behavior);
    }

    /// Total calls that reached the engine, across all capabilities.
    #[must_use]
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Clear all configured behaviors.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.discovery_rules.clear();
        guard.lookup_rules.clear();
        guard.contact_rules.clear();
        guard.crm_rules.clear();
    }
}

/// A connector that defers all behavior to an external controller.
pub struct DynamicMockEngine {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
    calls: Arc<AtomicU64>,
}

impl DynamicMockEngine {
    /// Create a new dynamic mock engine and its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<dyn EngineConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let calls = Arc::new(AtomicU64::new(0));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
            calls: Arc::clone(&calls),
        };
        let engine = Arc::new(Self { name, state, calls });
        (engine as Arc<dyn EngineConnector>, controller)
    }

    async fn resolve<T: Clone>(
        &self,
        behavior: Option<MockBehavior<T>>,
        capability: Capability,
    ) -> Result<T, ScoutError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match behavior {
            Some(MockBehavior::Return(v)) => Ok(v),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Err(ScoutError::unsupported(capability)),
        }
    }
}

#[async_trait]
impl EngineConnector for DynamicMockEngine {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
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

    fn as_crm_status_provider(&self) -> Option<&dyn CrmStatusProvider> {
        Some(self)
    }
}

#[async_trait]
impl DiscoveryProvider for DynamicMockEngine {
    async fn discover(&self, req: &DiscoveryRequest) -> Result<Vec<CompanyRecord>, ScoutError> {
        let behavior = {
            let guard = self.state.lock().await;
            guard.discovery_rules.get(req.query()).cloned()
        };
        self.resolve(behavior, Capability::Discovery).await
    }
}

#[async_trait]
impl NameLookupProvider for DynamicMockEngine {
    async fn lookup_by_name(
        &self,
        req: &NameLookupRequest,
    ) -> Result<Vec<CompanyRecord>, ScoutError> {
        let behavior = {
            let guard = self.state.lock().await;
            guard.lookup_rules.get(req.name()).cloned()
        };
        self.resolve(behavior, Capability::NameLookup).await
    }
}

#[async_trait]
impl ContactEnrichmentProvider for DynamicMockEngine {
    async fn enrich_contacts(&self, domain: &Domain) -> Result<ContactSummary, ScoutError> {
        let behavior = {
            let guard = self.state.lock().await;
            guard.contact_rules.get(domain.as_str()).cloned()
        };
        self.resolve(behavior, Capability::ContactEnrichment).await
    }
}

#[async_trait]
impl CrmStatusProvider for DynamicMockEngine {
    async fn crm_status(&self, domain: &Domain) -> Result<CrmStatus, ScoutError> {
        let behavior = {
            let guard = self.state.lock().await;
            guard.crm_rules.get(domain.as_str()).cloned()
        };
        self.resolve(behavior, Capability::CrmStatus).await
    }
}
