//! Composable middleware layers for engine connectors.
//!
//! Each layer wraps an [`EngineConnector`](scout_core::EngineConnector) and
//! implements the same trait, so layers nest into an onion around the raw
//! adapter. The [`builder::ConnectorBuilder`] composes and validates stacks;
//! see its module docs for the ordering convention.

pub mod budget;
pub mod builder;
pub mod cache;
pub mod cooldown;
pub mod health;
pub mod resilient;

pub use budget::{BudgetMiddleware, BudgetTrackingConnector, UsageLedger};
pub use builder::ConnectorBuilder;
pub use cache::{CacheMiddleware, CacheStore, CacheStores, CachingConnector, LruTtlStore};
pub use cooldown::{CooldownConnector, CooldownMiddleware};
pub use health::{CallSample, HealthMiddleware, HealthRecordingConnector, HealthTracker};
pub use resilient::{ResilienceMiddleware, ResilientConnector};
