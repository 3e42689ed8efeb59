//! Scout orchestrates company discovery across multiple search and
//! enrichment providers.
//!
//! Overview
//! - Routes requests to engines that implement the `scout_core` contracts.
//! - Orders eligible engines per request by health, budget standing, and the
//!   configured routing policy, falling back to registration order.
//! - Wraps every registered engine in a standard middleware stack: per
//!   capability caching, auth-failure cooldown, budget accounting, health
//!   observation, and retry/timeout resilience.
//! - Normalizes error handling and exposes uniform domain types from
//!   `scout_core`.
//!
//! Key behaviors and trade-offs
//! - Discovery fan-out: a search queries the top-ranked discovery engines
//!   concurrently and merges their results by root domain; broader coverage
//!   at the cost of extra requests.
//! - Fallback ops: single-result operations (lookup, contacts, CRM, email,
//!   signals) walk engines in routing order and return the first success;
//!   deterministic and economical on rate limits, but slower when the
//!   preferred engine is failing.
//! - Budgets deprioritize, never block: an over-budget engine drops to the
//!   back of the order so a degraded answer still beats no answer.
//! - Provider failures are absorbed as [`SearchReport`] warnings; a search
//!   where every discovery engine fails returns an empty report, not an
//!   error.
//!
//! Examples
//! Building an orchestrator with preferences and budgets:
//! ```rust,ignore
//! use std::sync::Arc;
//! use scout::{BudgetConfig, Capability, RoutingPolicy, Scout};
//!
//! let exa = Arc::new(ExaConnector::builder().api_key("...").build()?);
//! let serper = Arc::new(SerperConnector::builder().api_key("...").build()?);
//!
//! let scout = Scout::builder()
//!     .with_engine(exa)
//!     .with_engine(serper)
//!     .routing_policy(RoutingPolicy::new().prefer(Capability::Discovery, ["exa", "serper"]))
//!     .budget(BudgetConfig::default().with_limit("serper", 500))
//!     .build()?;
//! ```
//!
//! Running a search and inspecting the report:
//! ```rust,ignore
//! use scout::DiscoveryRequest;
//!
//! let req = DiscoveryRequest::new("fintech startups in Berlin")?.with_limit(25);
//! let report = scout.search(&req).await?;
//! for company in &report.companies {
//!     println!("{} ({})", company.name, company.domain);
//! }
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use core::{Scout, ScoutBuilder};
pub use router::util::{collapse_errors, join_with_deadline};

pub use scout_middleware::{
    BudgetMiddleware, CacheMiddleware, ConnectorBuilder, CooldownMiddleware, HealthMiddleware,
    HealthTracker, ResilienceMiddleware, UsageLedger,
};

// Re-export core types for convenience
pub use scout_core::{
    // Foundational types
    Capability,
    ConnectorKey,
    Domain,
    EngineConnector,
    ScoutError,

    // Request types
    DiscoveryRequest,
    NameLookupRequest,

    // Response types & data structures
    BudgetState,
    CompanyRecord,
    ContactSummary,
    CrmStanding,
    CrmStatus,
    EmailOutcome,
    EmailVerdict,
    FitScore,
    HealthState,
    ProviderHealth,
    ScoreFactor,
    SearchReport,
    Signal,
    SignalKind,
    SizeBucket,

    // Configuration
    BudgetConfig,
    CacheTtlConfig,
    HealthConfig,
    RetryConfig,
    RoutingPolicy,
    ScoutConfig,
    ScoringWeights,
    TargetCriteria,
};
