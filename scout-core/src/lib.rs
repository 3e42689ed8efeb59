//! Core contracts and pure pipeline logic for the scout workspace.
//!
//! This crate defines:
//! - the per-capability provider traits and the [`EngineConnector`] master
//!   trait that engine adapters implement ([`connector`]);
//! - the middleware contract used to compose connector onions
//!   ([`middleware`]);
//! - retry/timeout helpers ([`resilience`]);
//! - cross-provider de-duplication ([`dedup`]) and fit scoring ([`scoring`]);
//! - domain noise filtering ([`domain`]).
//!
//! Everything here is I/O-free except for the timer usage in [`resilience`].

pub mod connector;
pub mod dedup;
pub mod domain;
pub mod middleware;
pub mod resilience;
pub mod scoring;

pub use connector::{
    ContactEnrichmentProvider, CrmStatusProvider, DiscoveryProvider, EmailVerificationProvider,
    EngineConnector, NameLookupProvider, SignalExtractionProvider,
};
pub use middleware::{CallContext, CallHooks, Middleware};

// Re-export the shared data model so downstream crates can depend on
// `scout-core` alone.
pub use scout_types::*;
