//! Read-through caching with per-capability TTLs.
//!
//! The cache sits at the outermost position of the standard stack so a hit
//! never touches budget, health, or the network. Each capability has its own
//! store (and TTL); a capability with no store is a pure pass-through.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lru::LruCache;
use serde_json::json;
use tokio::sync::Mutex;
use tokio::time::Instant;

use scout_core::connector::{
    ContactEnrichmentProvider, CrmStatusProvider, DiscoveryProvider, EmailVerificationProvider,
    EngineConnector, NameLookupProvider, SignalExtractionProvider,
};
use scout_core::{
    CacheTtlConfig, CompanyRecord, ContactSummary, CrmStatus, DiscoveryRequest, Domain,
    EmailVerdict, Middleware, NameLookupRequest, ScoutError, Signal,
};

/// Async key/value store with TTL semantics.
#[async_trait]
pub trait CacheStore<K, V>: Send + Sync
where
    K: Send + Sync,
    V: Send + Sync,
{
    /// Fetch a live entry, or `None` when absent or expired.
    async fn get(&self, key: &K) -> Option<V>;
    /// Insert or replace an entry.
    async fn put(&self, key: K, value: V);
    /// Drop all entries.
    async fn clear(&self);
}

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// Bounded LRU store with lazy expiry: entries past their TTL are purged on
/// read rather than by a background task.
pub struct LruTtlStore<K, V> {
    entries: Mutex<LruCache<K, Entry<V>>>,
    ttl: Duration,
}

impl<K: Hash + Eq, V> LruTtlStore<K, V> {
    /// Create a store holding at most `capacity` entries, each live for `ttl`.
    #[must_use]
    pub fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }
}

#[async_trait]
impl<K, V> CacheStore<K, V> for LruTtlStore<K, V>
where
    K: Hash + Eq + Send + Sync,
    V: Clone + Send + Sync,
{
    async fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            Some(_) => {
                entries.pop(key);
                None
            }
            None => None,
        }
    }

    async fn put(&self, key: K, value: V) {
        let mut entries = self.entries.lock().await;
        entries.push(
            key,
            Entry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}

/// Cache key constructors. Keys are namespaced by capability so identical
/// inputs to different capabilities never collide.
pub mod keys {
    use super::{DefaultHasher, DiscoveryRequest, Domain, Hash, Hasher, NameLookupRequest};

    fn fingerprint(parts: &[&str]) -> u64 {
        let mut hasher = DefaultHasher::new();
        for part in parts {
            part.hash(&mut hasher);
        }
        hasher.finish()
    }

    /// Key for a discovery request: query plus every filter that changes the
    /// result set.
    #[must_use]
    pub fn discovery(req: &DiscoveryRequest) -> String {
        let query = req.query().trim().to_lowercase();
        let mut verticals = req.verticals.clone();
        verticals.sort();
        let mut regions = req.regions.clone();
        regions.sort();
        let mut excluded: Vec<&str> = req.exclude_domains.iter().map(Domain::as_str).collect();
        excluded.sort_unstable();
        let parts: Vec<String> = [
            query,
            verticals.join(","),
            regions.join(","),
            format!("{:?}", req.size),
            excluded.join(","),
            format!("{:?}", req.min_relevance),
            format!("{:?}", req.limit),
        ]
        .into();
        let refs: Vec<&str> = parts.iter().map(String::as_str).collect();
        format!("discovery:{:016x}", fingerprint(&refs))
    }

    /// Key for a name lookup.
    #[must_use]
    pub fn name_lookup(req: &NameLookupRequest) -> String {
        format!(
            "name_lookup:{:016x}",
            fingerprint(&[
                &req.name().trim().to_lowercase(),
                &format!("{:?}", req.limit)
            ])
        )
    }

    /// Key for contact enrichment.
    #[must_use]
    pub fn contacts(domain: &Domain) -> String {
        format!("contacts:{domain}")
    }

    /// Key for CRM status.
    #[must_use]
    pub fn crm(domain: &Domain) -> String {
        format!("crm:{domain}")
    }

    /// Key for email verification.
    #[must_use]
    pub fn email(email: &str) -> String {
        format!("email:{}", email.trim().to_lowercase())
    }

    /// Key for signal extraction: domain plus a fingerprint of the corpus.
    #[must_use]
    pub fn signals(domain: &Domain, corpus: &str) -> String {
        format!("signals:{domain}:{:016x}", fingerprint(&[corpus]))
    }
}

/// One store per capability. `None` disables caching for that capability.
#[derive(Default)]
pub struct CacheStores {
    /// Discovery result store.
    pub discovery: Option<Arc<dyn CacheStore<String, Arc<Vec<CompanyRecord>>>>>,
    /// Name lookup result store.
    pub name_lookup: Option<Arc<dyn CacheStore<String, Arc<Vec<CompanyRecord>>>>>,
    /// Contact summary store.
    pub contacts: Option<Arc<dyn CacheStore<String, Arc<ContactSummary>>>>,
    /// CRM status store.
    pub crm: Option<Arc<dyn CacheStore<String, Arc<CrmStatus>>>>,
    /// Email verdict store.
    pub email_verification: Option<Arc<dyn CacheStore<String, Arc<EmailVerdict>>>>,
    /// Signal store.
    pub signals: Option<Arc<dyn CacheStore<String, Arc<Vec<Signal>>>>>,
}

impl CacheStores {
    /// LRU stores for every capability, sized and aged per `cfg`.
    #[must_use]
    pub fn lru(cfg: &CacheTtlConfig) -> Self {
        let capacity = NonZeroUsize::new(cfg.capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            discovery: Some(Arc::new(LruTtlStore::new(capacity, cfg.discovery))),
            name_lookup: Some(Arc::new(LruTtlStore::new(capacity, cfg.name_lookup))),
            contacts: Some(Arc::new(LruTtlStore::new(capacity, cfg.contacts))),
            crm: Some(Arc::new(LruTtlStore::new(capacity, cfg.crm))),
            email_verification: Some(Arc::new(LruTtlStore::new(
                capacity,
                cfg.email_verification,
            ))),
            signals: Some(Arc::new(LruTtlStore::new(capacity, cfg.signals))),
        }
    }
}

/// Read-through cache wrapper.
pub struct CachingConnector {
    inner: Arc<dyn EngineConnector>,
    stores: CacheStores,
}

#[scout_macros::delegate_connector(inner)]
impl CachingConnector {
    /// Wrap `inner` with the given stores.
    #[must_use]
    pub fn new(inner: Arc<dyn EngineConnector>, stores: CacheStores) -> Self {
        Self { inner, stores }
    }
}

#[async_trait]
impl DiscoveryProvider for CachingConnector {
    async fn discover(&self, req: &DiscoveryRequest) -> Result<Vec<CompanyRecord>, ScoutError> {
        let inner = self
            .inner
            .as_discovery_provider()
            .ok_or_else(|| ScoutError::unsupported(scout_core::Capability::Discovery))?;
        let Some(store) = &self.stores.discovery else {
            return inner.discover(req).await;
        };
        let key = keys::discovery(req);
        if let Some(hit) = store.get(&key).await {
            return Ok((*hit).clone());
        }
        let fresh = inner.discover(req).await?;
        store.put(key, Arc::new(fresh.clone())).await;
        Ok(fresh)
    }
}

#[async_trait]
impl NameLookupProvider for CachingConnector {
    async fn lookup_by_name(
        &self,
        req: &NameLookupRequest,
    ) -> Result<Vec<CompanyRecord>, ScoutError> {
        let inner = self
            .inner
            .as_name_lookup_provider()
            .ok_or_else(|| ScoutError::unsupported(scout_core::Capability::NameLookup))?;
        let Some(store) = &self.stores.name_lookup else {
            return inner.lookup_by_name(req).await;
        };
        let key = keys::name_lookup(req);
        if let Some(hit) = store.get(&key).await {
            return Ok((*hit).clone());
        }
        let fresh = inner.lookup_by_name(req).await?;
        store.put(key, Arc::new(fresh.clone())).await;
        Ok(fresh)
    }
}

#[async_trait]
impl ContactEnrichmentProvider for CachingConnector {
    async fn enrich_contacts(&self, domain: &Domain) -> Result<ContactSummary, ScoutError> {
        let inner = self
            .inner
            .as_contact_enrichment_provider()
            .ok_or_else(|| ScoutError::unsupported(scout_core::Capability::ContactEnrichment))?;
        let Some(store) = &self.stores.contacts else {
            return inner.enrich_contacts(domain).await;
        };
        let key = keys::contacts(domain);
        if let Some(hit) = store.get(&key).await {
            return Ok((*hit).clone());
        }
        let fresh = inner.enrich_contacts(domain).await?;
        store.put(key, Arc::new(fresh.clone())).await;
        Ok(fresh)
    }
}

#[async_trait]
impl EmailVerificationProvider for CachingConnector {
    async fn verify_email(&self, email: &str) -> Result<EmailVerdict, ScoutError> {
        let inner = self
            .inner
            .as_email_verification_provider()
            .ok_or_else(|| ScoutError::unsupported(scout_core::Capability::EmailVerification))?;
        let Some(store) = &self.stores.email_verification else {
            return inner.verify_email(email).await;
        };
        let key = keys::email(email);
        if let Some(hit) = store.get(&key).await {
            return Ok((*hit).clone());
        }
        let fresh = inner.verify_email(email).await?;
        store.put(key, Arc::new(fresh.clone())).await;
        Ok(fresh)
    }
}

#[async_trait]
impl CrmStatusProvider for CachingConnector {
    async fn crm_status(&self, domain: &Domain) -> Result<CrmStatus, ScoutError> {
        let inner = self
            .inner
            .as_crm_status_provider()
            .ok_or_else(|| ScoutError::unsupported(scout_core::Capability::CrmStatus))?;
        let Some(store) = &self.stores.crm else {
            return inner.crm_status(domain).await;
        };
        let key = keys::crm(domain);
        if let Some(hit) = store.get(&key).await {
            return Ok((*hit).clone());
        }
        let fresh = inner.crm_status(domain).await?;
        store.put(key, Arc::new(fresh.clone())).await;
        Ok(fresh)
    }
}

#[async_trait]
impl SignalExtractionProvider for CachingConnector {
    async fn extract_signals(
        &self,
        domain: &Domain,
        corpus: &str,
    ) -> Result<Vec<Signal>, ScoutError> {
        let inner = self
            .inner
            .as_signal_extraction_provider()
            .ok_or_else(|| ScoutError::unsupported(scout_core::Capability::SignalExtraction))?;
        let Some(store) = &self.stores.signals else {
            return inner.extract_signals(domain, corpus).await;
        };
        let key = keys::signals(domain, corpus);
        if let Some(hit) = store.get(&key).await {
            return Ok((*hit).clone());
        }
        let fresh = inner.extract_signals(domain, corpus).await?;
        store.put(key, Arc::new(fresh.clone())).await;
        Ok(fresh)
    }
}

/// [`Middleware`] factory for [`CachingConnector`].
pub struct CacheMiddleware {
    cfg: CacheTtlConfig,
}

impl CacheMiddleware {
    /// Cache layer with the given TTLs.
    #[must_use]
    pub fn new(cfg: CacheTtlConfig) -> Self {
        Self { cfg }
    }
}

impl Middleware for CacheMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn EngineConnector>) -> Arc<dyn EngineConnector> {
        Arc::new(CachingConnector::new(inner, CacheStores::lru(&self.cfg)))
    }

    fn name(&self) -> &'static str {
        "CachingConnector"
    }

    fn config_json(&self) -> serde_json::Value {
        json!({
            "discovery_ttl_ms": self.cfg.discovery.as_millis() as u64,
            "name_lookup_ttl_ms": self.cfg.name_lookup.as_millis() as u64,
            "contacts_ttl_ms": self.cfg.contacts.as_millis() as u64,
            "crm_ttl_ms": self.cfg.crm.as_millis() as u64,
            "email_verification_ttl_ms": self.cfg.email_verification.as_millis() as u64,
            "signals_ttl_ms": self.cfg.signals.as_millis() as u64,
            "capacity": self.cfg.capacity,
        })
    }
}
