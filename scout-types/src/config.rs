use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::records::SizeBucket;
use crate::routing_policy::RoutingPolicy;

/// Retry behavior for transient provider failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the initial attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each subsequent retry.
    pub base_delay: Duration,
    /// Cap on the exponential delay, before jitter.
    pub max_delay: Duration,
    /// Jitter applied to each delay, as `+/- percent` of the computed value.
    pub jitter_percent: u8,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
            jitter_percent: 25,
        }
    }
}

/// Per-capability cache lifetimes.
///
/// Lifetimes reflect how fast each data class goes stale: CRM standing churns
/// within the hour, discovery results hold for a working session, and email
/// deliverability barely moves month to month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheTtlConfig {
    /// TTL for discovery results.
    pub discovery: Duration,
    /// TTL for name lookup results.
    pub name_lookup: Duration,
    /// TTL for contact summaries.
    pub contacts: Duration,
    /// TTL for CRM standing.
    pub crm: Duration,
    /// TTL for email verification verdicts.
    pub email_verification: Duration,
    /// TTL for extracted signals.
    pub signals: Duration,
    /// Max entries per capability store.
    pub capacity: usize,
}

impl Default for CacheTtlConfig {
    fn default() -> Self {
        Self {
            discovery: Duration::from_secs(360 * 60),
            name_lookup: Duration::from_secs(360 * 60),
            contacts: Duration::from_secs(720 * 60),
            crm: Duration::from_secs(45 * 60),
            email_verification: Duration::from_secs(43_200 * 60),
            signals: Duration::from_secs(360 * 60),
            capacity: 1024,
        }
    }
}

/// Per-engine daily request budgets, keyed by engine name.
///
/// An engine with no entry is unbudgeted. Budgets influence routing order
/// (over-budget engines are deprioritized, not blocked) and are reset at UTC
/// midnight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// Daily call limits per engine name.
    pub daily_limits: BTreeMap<String, u64>,
}

impl BudgetConfig {
    /// Set the daily limit for an engine.
    #[must_use]
    pub fn with_limit(mut self, engine: impl Into<String>, limit: u64) -> Self {
        self.daily_limits.insert(engine.into(), limit);
        self
    }

    /// The configured limit for an engine, if any.
    #[must_use]
    pub fn limit_for(&self, engine: &str) -> Option<u64> {
        self.daily_limits.get(engine).copied()
    }
}

/// Health classification thresholds and observation windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Failure rate at or above which an engine is `Degraded`.
    pub degraded_threshold: f64,
    /// Failure rate at or above which an engine is `Down`.
    pub down_threshold: f64,
    /// Window used for routing decisions.
    pub routing_window: Duration,
    /// Window used for health reporting.
    pub reporting_window: Duration,
    /// How long a computed health snapshot is reused before recomputing.
    pub snapshot_ttl: Duration,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            degraded_threshold: 0.05,
            down_threshold: 0.20,
            routing_window: Duration::from_secs(5 * 60),
            reporting_window: Duration::from_secs(60 * 60),
            snapshot_ttl: Duration::from_secs(2 * 60),
        }
    }
}

/// Point weights for fit scoring.
///
/// Positive weights are awarded when the factor matches; `negative_keyword`
/// and `customer_penalty` are magnitudes that get subtracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Points for a vertical match.
    pub vertical_match: f64,
    /// Points for a headcount bucket match.
    pub size_match: f64,
    /// Points for a region match.
    pub region_match: f64,
    /// Points when at least one buying signal is present.
    pub buying_signal: f64,
    /// Penalty magnitude when a negative keyword matches.
    pub negative_keyword: f64,
    /// Maximum points from provider relevance (scaled linearly).
    pub relevance_max: f64,
    /// Points when the company is an active lead or open opportunity.
    pub active_lead: f64,
    /// Penalty magnitude when the company is already a customer.
    pub customer_penalty: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            vertical_match: 30.0,
            size_match: 15.0,
            region_match: 10.0,
            buying_signal: 15.0,
            negative_keyword: 20.0,
            relevance_max: 20.0,
            active_lead: 10.0,
            customer_penalty: 25.0,
        }
    }
}

/// What an ideal company looks like; the reference for fit scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetCriteria {
    /// Desired verticals.
    pub verticals: Vec<String>,
    /// Desired headcount bucket.
    pub size: Option<SizeBucket>,
    /// Desired regions.
    pub regions: Vec<String>,
    /// Keywords that disqualify a company when they appear in its name,
    /// description, or signals.
    pub negative_keywords: Vec<String>,
}

/// Top-level orchestrator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoutConfig {
    /// Per-capability engine preference order.
    pub routing: RoutingPolicy,
    /// Retry behavior for transient failures.
    pub retry: RetryConfig,
    /// Cache lifetimes per capability.
    pub cache_ttl: CacheTtlConfig,
    /// Daily request budgets per engine.
    pub budget: BudgetConfig,
    /// Health thresholds and windows.
    pub health: HealthConfig,
    /// Fit scoring weights.
    pub weights: ScoringWeights,
    /// Target profile that companies are scored against.
    pub criteria: TargetCriteria,
    /// Cooldown applied to an engine after an authentication failure.
    pub auth_cooldown: Duration,
    /// Per-provider call deadline.
    pub provider_timeout: Duration,
    /// Optional end-to-end deadline for a whole request.
    pub request_timeout: Option<Duration>,
    /// Weight given to the newest record's score when merging duplicates.
    pub recency_weight: f64,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            routing: RoutingPolicy::default(),
            retry: RetryConfig::default(),
            cache_ttl: CacheTtlConfig::default(),
            budget: BudgetConfig::default(),
            health: HealthConfig::default(),
            weights: ScoringWeights::default(),
            criteria: TargetCriteria::default(),
            auth_cooldown: Duration::from_secs(10 * 60),
            provider_timeout: Duration::from_secs(10),
            request_timeout: None,
            recency_weight: 1.5,
        }
    }
}
