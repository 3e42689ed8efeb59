//! Shared routing state and candidate ordering.
//!
//! The router orders eligible engines by, in precedence order: health
//! classification, budget standing, policy rank, registration index. Health
//! is read from a snapshot refreshed at most once per `snapshot_ttl`, so a
//! burst of requests does not recompute sliding-window statistics per call.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use scout_core::connector::EngineConnector;
use scout_core::{Capability, HealthState};
use scout_middleware::{HealthTracker, UsageLedger};

use crate::core::Scout;

struct Snapshot {
    taken_at: Instant,
    states: HashMap<String, HealthState>,
}

/// State shared between the router and the middleware stacks of every
/// registered engine.
pub(crate) struct RouterState {
    pub(crate) ledger: Arc<UsageLedger>,
    pub(crate) tracker: Arc<HealthTracker>,
    snapshot: Mutex<Option<Snapshot>>,
}

impl RouterState {
    pub(crate) fn new(ledger: Arc<UsageLedger>, tracker: Arc<HealthTracker>) -> Self {
        Self {
            ledger,
            tracker,
            snapshot: Mutex::new(None),
        }
    }

    /// Health states for the given engines, recomputed when the cached
    /// snapshot is older than `ttl`.
    fn health_states<'a>(
        &self,
        engines: impl Iterator<Item = &'a str>,
        ttl: std::time::Duration,
    ) -> HashMap<String, HealthState> {
        let mut guard = self.snapshot.lock().expect("mutex poisoned");
        let stale = guard
            .as_ref()
            .is_none_or(|s| s.taken_at.elapsed() > ttl);
        if stale {
            let states = engines
                .map(|name| (name.to_string(), self.tracker.state(name)))
                .collect();
            *guard = Some(Snapshot {
                taken_at: Instant::now(),
                states,
            });
        }
        guard
            .as_ref()
            .map(|s| s.states.clone())
            .unwrap_or_default()
    }
}

impl Scout {
    /// Engines serving `capability`, in routing order.
    pub(crate) fn ordered_for(&self, capability: Capability) -> Vec<Arc<dyn EngineConnector>> {
        let health = self.state.health_states(
            self.engines.iter().map(|e| e.name()),
            self.cfg.health.snapshot_ttl,
        );

        let mut out: Vec<(usize, Arc<dyn EngineConnector>)> = self
            .engines
            .iter()
            .cloned()
            .enumerate()
            .filter(|(_, e)| e.supports(capability))
            .collect();

        out.sort_by_key(|(orig_i, e)| {
            let name = e.name();
            let health_rank = health.get(name).copied().map_or(0, HealthState::rank);
            let over_budget = u8::from(
                self.cfg
                    .budget
                    .limit_for(name)
                    .is_some_and(|limit| self.state.ledger.used_today(name) >= limit),
            );
            let policy_rank = self
                .cfg
                .routing
                .rank(capability, name)
                .unwrap_or(usize::MAX);
            (health_rank, over_budget, policy_rank, *orig_i)
        });

        out.into_iter().map(|(_, e)| e).collect()
    }
}
