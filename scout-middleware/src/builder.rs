//! Builder for composing connectors with middleware layers.
//!
//! # Middleware Ordering Convention
//!
//! Layers form an onion around the raw adapter. The standard stack, from
//! outermost to innermost:
//!
//! ```text
//! User Request
//!     |
//! CachingConnector          (hits short-circuit everything below)
//!     |
//! CooldownConnector         (benched engines fail fast)
//!     |
//! HealthRecordingConnector  (one outcome sample per logical call)
//!     |
//! ResilientConnector        (per-attempt timeout + retry)
//!     |
//! BudgetTrackingConnector   (charges every outbound attempt, retries included)
//!     |
//! Raw adapter               (makes the API call)
//! ```
//!
//! The `layers` vector stores middleware **outermost-first**; `build()`
//! applies them in reverse so `layers[0]` ends up as the outermost wrapper.
//! `build()` rejects stacks whose known layers appear out of canonical
//! relative order, because a budget layer outside the cache would charge for
//! cache hits and a budget layer outside resilience would miss the extra
//! attempts retries make.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use scout_core::connector::EngineConnector;
use scout_core::{
    CacheTtlConfig, Middleware, MiddlewareLayer, MiddlewareStack, RetryConfig, ScoutError,
};

use crate::budget::{BudgetMiddleware, UsageLedger};
use crate::cache::CacheMiddleware;
use crate::cooldown::CooldownMiddleware;
use crate::health::{HealthMiddleware, HealthTracker};
use crate::resilient::ResilienceMiddleware;

/// Known layer names, outermost-first. Present layers must respect this
/// relative order.
const CANONICAL_ORDER: &[&str] = &[
    "CachingConnector",
    "CooldownConnector",
    "HealthRecordingConnector",
    "ResilientConnector",
    "BudgetTrackingConnector",
];

/// Generic middleware builder for composing a connector with layered wrappers.
///
/// See the [module-level documentation](self) for the ordering convention.
pub struct ConnectorBuilder {
    raw: Arc<dyn EngineConnector>,
    /// Middleware layers in outermost-first order.
    layers: Vec<Box<dyn Middleware>>,
}

impl ConnectorBuilder {
    /// Create a builder from a raw, unwrapped connector.
    #[must_use]
    pub fn new(raw: Arc<dyn EngineConnector>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// The full standard stack around `raw`, wired to the given shared
    /// ledger and tracker.
    #[must_use]
    pub fn standard(
        raw: Arc<dyn EngineConnector>,
        cache: CacheTtlConfig,
        auth_cooldown: Duration,
        ledger: Arc<UsageLedger>,
        tracker: Arc<HealthTracker>,
        retry: RetryConfig,
        call_timeout: Duration,
    ) -> Self {
        Self::new(raw)
            .with_budget(ledger)
            .with_resilience(retry, call_timeout)
            .with_health(tracker)
            .with_cooldown(auth_cooldown)
            .with_cache(cache)
    }

    fn replace_outermost(mut self, layer: Box<dyn Middleware>) -> Self {
        let name = layer.name();
        self.layers.retain(|m| m.name() != name);
        self.layers.insert(0, layer);
        self
    }

    /// Add or replace the cache layer at the outermost position.
    #[must_use]
    pub fn with_cache(self, cfg: CacheTtlConfig) -> Self {
        self.replace_outermost(Box::new(CacheMiddleware::new(cfg)))
    }

    /// Remove the cache layer if present.
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.layers.retain(|m| m.name() != "CachingConnector");
        self
    }

    /// Add or replace the auth-cooldown layer at the outermost position.
    #[must_use]
    pub fn with_cooldown(self, period: Duration) -> Self {
        self.replace_outermost(Box::new(CooldownMiddleware::new(period)))
    }

    /// Add or replace the budget layer at the outermost position.
    #[must_use]
    pub fn with_budget(self, ledger: Arc<UsageLedger>) -> Self {
        self.replace_outermost(Box::new(BudgetMiddleware::new(ledger)))
    }

    /// Add or replace the health layer at the outermost position.
    #[must_use]
    pub fn with_health(self, tracker: Arc<HealthTracker>) -> Self {
        self.replace_outermost(Box::new(HealthMiddleware::new(tracker)))
    }

    /// Add or replace the resilience layer at the outermost position.
    #[must_use]
    pub fn with_resilience(self, retry: RetryConfig, call_timeout: Duration) -> Self {
        self.replace_outermost(Box::new(ResilienceMiddleware::new(retry, call_timeout)))
    }

    /// Add an arbitrary middleware layer at the outermost position.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn Middleware>) -> Self {
        self.layers.insert(0, layer);
        self
    }

    /// Export the current stack for inspection or storage.
    ///
    /// The raw connector is appended as the innermost pseudo-layer for
    /// observability.
    #[must_use]
    pub fn to_stack(&self) -> MiddlewareStack {
        let mut stack = MiddlewareStack::new();
        for layer in &self.layers {
            stack.push_inner(MiddlewareLayer::new(layer.name(), layer.config_json()));
        }
        stack.push_inner(MiddlewareLayer::new(
            "RawConnector",
            json!({ "name": self.raw.name() }),
        ));
        stack
    }

    /// Reconstruct a builder from a serialized stack.
    ///
    /// Only stateless layers (cache, cooldown, resilience) are rebuilt from
    /// their configuration. Budget and health layers carry shared in-process
    /// state that a serialized stack cannot capture; re-add them explicitly
    /// with [`with_budget`](Self::with_budget) and
    /// [`with_health`](Self::with_health). Unknown layer names are ignored.
    #[must_use]
    pub fn from_stack(raw: Arc<dyn EngineConnector>, stack: &MiddlewareStack) -> Self {
        let mut layers: Vec<Box<dyn Middleware>> = Vec::new();
        for layer in &stack.layers {
            match layer.name.as_str() {
                "CachingConnector" => {
                    let defaults = CacheTtlConfig::default();
                    let ms = |key: &str, fallback: Duration| {
                        layer
                            .config
                            .get(key)
                            .and_then(serde_json::Value::as_u64)
                            .map_or(fallback, Duration::from_millis)
                    };
                    let cfg = CacheTtlConfig {
                        discovery: ms("discovery_ttl_ms", defaults.discovery),
                        name_lookup: ms("name_lookup_ttl_ms", defaults.name_lookup),
                        contacts: ms("contacts_ttl_ms", defaults.contacts),
                        crm: ms("crm_ttl_ms", defaults.crm),
                        email_verification: ms(
                            "email_verification_ttl_ms",
                            defaults.email_verification,
                        ),
                        signals: ms("signals_ttl_ms", defaults.signals),
                        capacity: layer
                            .config
                            .get("capacity")
                            .and_then(serde_json::Value::as_u64)
                            .and_then(|c| usize::try_from(c).ok())
                            .unwrap_or(defaults.capacity),
                    };
                    layers.push(Box::new(CacheMiddleware::new(cfg)));
                }
                "CooldownConnector" => {
                    let period_ms = layer
                        .config
                        .get("period_ms")
                        .and_then(serde_json::Value::as_u64)
                        .unwrap_or(600_000);
                    layers.push(Box::new(CooldownMiddleware::new(Duration::from_millis(
                        period_ms,
                    ))));
                }
                "ResilientConnector" => {
                    let defaults = RetryConfig::default();
                    let retry = RetryConfig {
                        max_retries: layer
                            .config
                            .get("max_retries")
                            .and_then(serde_json::Value::as_u64)
                            .and_then(|v| u32::try_from(v).ok())
                            .unwrap_or(defaults.max_retries),
                        base_delay: layer
                            .config
                            .get("base_delay_ms")
                            .and_then(serde_json::Value::as_u64)
                            .map_or(defaults.base_delay, Duration::from_millis),
                        max_delay: layer
                            .config
                            .get("max_delay_ms")
                            .and_then(serde_json::Value::as_u64)
                            .map_or(defaults.max_delay, Duration::from_millis),
                        jitter_percent: layer
                            .config
                            .get("jitter_percent")
                            .and_then(serde_json::Value::as_u64)
                            .and_then(|v| u8::try_from(v).ok())
                            .unwrap_or(defaults.jitter_percent),
                    };
                    let call_timeout = layer
                        .config
                        .get("call_timeout_ms")
                        .and_then(serde_json::Value::as_u64)
                        .map_or(Duration::from_secs(10), Duration::from_millis);
                    layers.push(Box::new(ResilienceMiddleware::new(retry, call_timeout)));
                }
                _ => {}
            }
        }
        Self { raw, layers }
    }

    fn validate(&self) -> Result<(), ScoutError> {
        let mut last_rank: Option<usize> = None;
        for layer in &self.layers {
            let Some(rank) = CANONICAL_ORDER.iter().position(|n| *n == layer.name()) else {
                continue;
            };
            if let Some(prev) = last_rank {
                if rank < prev {
                    return Err(ScoutError::InvalidMiddlewareStack {
                        message: format!(
                            "{} must wrap {}, not the other way around",
                            CANONICAL_ORDER[rank], CANONICAL_ORDER[prev]
                        ),
                    });
                }
            }
            last_rank = Some(rank);
        }
        Ok(())
    }

    /// Build the wrapped connector.
    ///
    /// Layers are applied in reverse storage order so that `layers[0]`
    /// becomes the outermost wrapper.
    ///
    /// # Errors
    /// Returns [`ScoutError::InvalidMiddlewareStack`] when known layers are
    /// ordered incorrectly relative to each other.
    pub fn build(self) -> Result<Arc<dyn EngineConnector>, ScoutError> {
        self.validate()?;
        let mut acc: Arc<dyn EngineConnector> = Arc::clone(&self.raw);
        for middleware in self.layers.into_iter().rev() {
            acc = middleware.apply(acc);
        }
        Ok(acc)
    }
}
