//! Shared data model for the scout workspace.
//!
//! This crate holds the types that cross crate boundaries: the error enum,
//! capability taxonomy, configuration structs, company/signal/report DTOs,
//! routing policy, and middleware stack descriptors. It deliberately contains
//! no I/O and no async code.

pub mod capability;
pub mod config;
pub mod connector;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod records;
pub mod reports;
pub mod requests;
pub mod routing_policy;

pub use capability::Capability;
pub use config::{
    BudgetConfig, CacheTtlConfig, HealthConfig, RetryConfig, ScoringWeights, ScoutConfig,
    TargetCriteria,
};
pub use connector::ConnectorKey;
pub use domain::Domain;
pub use error::ScoutError;
pub use middleware::{MiddlewareLayer, MiddlewareStack};
pub use records::{
    CompanyRecord, ContactSummary, CrmStanding, CrmStatus, EmailOutcome, EmailVerdict, FitScore,
    ScoreFactor, Signal, SignalKind, SizeBucket,
};
pub use reports::{BudgetState, HealthState, ProviderHealth, SearchReport};
pub use requests::{DiscoveryRequest, NameLookupRequest};
pub use routing_policy::RoutingPolicy;
