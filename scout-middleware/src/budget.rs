//! Daily usage accounting.
//!
//! [`BudgetTrackingConnector`] counts every call that reaches it, once per
//! real outbound attempt. In the standard stack it sits innermost, inside
//! the resilience layer, so each retry is charged and cache hits never are.
//! Enforcement happens in the router (over-budget engines are
//! deprioritized); this layer only counts.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde_json::json;

use scout_core::connector::EngineConnector;
use scout_core::{BudgetState, CallContext, CallHooks, Middleware, ScoutError};

struct DayCounter {
    day: NaiveDate,
    calls: u64,
}

/// Shared per-engine daily call counters.
///
/// Counters roll over at UTC midnight: the first call recorded on a new day
/// resets that engine's count.
#[derive(Default)]
pub struct UsageLedger {
    counters: Mutex<HashMap<String, DayCounter>>,
}

impl UsageLedger {
    /// Empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one outbound call for `engine`, dated today (UTC).
    pub fn record(&self, engine: &str) {
        self.record_on(engine, Utc::now().date_naive());
    }

    /// Record one outbound call for `engine` on the given day.
    pub fn record_on(&self, engine: &str, day: NaiveDate) {
        let mut counters = self.counters.lock().expect("mutex poisoned");
        let counter = counters
            .entry(engine.to_string())
            .or_insert(DayCounter { day, calls: 0 });
        if counter.day != day {
            counter.day = day;
            counter.calls = 0;
        }
        counter.calls += 1;
    }

    /// Calls recorded for `engine` today (UTC).
    #[must_use]
    pub fn used_today(&self, engine: &str) -> u64 {
        self.used_on(engine, Utc::now().date_naive())
    }

    /// Calls recorded for `engine` on the given day.
    #[must_use]
    pub fn used_on(&self, engine: &str, day: NaiveDate) -> u64 {
        let counters = self.counters.lock().expect("mutex poisoned");
        counters
            .get(engine)
            .filter(|c| c.day == day)
            .map_or(0, |c| c.calls)
    }

    /// Budget snapshot for `engine` against an optional daily limit.
    #[must_use]
    pub fn state(&self, engine: &str, limit: Option<u64>) -> BudgetState {
        let day = Utc::now().date_naive();
        let used = self.used_on(engine, day);
        BudgetState {
            engine: engine.to_string(),
            day,
            used,
            limit,
            remaining: limit.map(|l| l.saturating_sub(used)),
        }
    }
}

/// Wrapper that charges one ledger unit per call passing through it.
pub struct BudgetTrackingConnector {
    inner: Arc<dyn EngineConnector>,
    ledger: Arc<UsageLedger>,
}

#[scout_macros::delegate_connector(inner)]
#[scout_macros::delegate_all_providers(inner)]
impl BudgetTrackingConnector {
    /// Wrap `inner`, recording into `ledger`.
    #[must_use]
    pub fn new(inner: Arc<dyn EngineConnector>, ledger: Arc<UsageLedger>) -> Self {
        Self { inner, ledger }
    }
}

#[async_trait]
impl CallHooks for BudgetTrackingConnector {
    async fn pre_call(&self, _ctx: &CallContext) -> Result<(), ScoutError> {
        self.ledger.record(self.inner.name());
        Ok(())
    }
}

/// [`Middleware`] factory for [`BudgetTrackingConnector`].
pub struct BudgetMiddleware {
    ledger: Arc<UsageLedger>,
}

impl BudgetMiddleware {
    /// Budget layer recording into the given shared ledger.
    #[must_use]
    pub fn new(ledger: Arc<UsageLedger>) -> Self {
        Self { ledger }
    }
}

impl Middleware for BudgetMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn EngineConnector>) -> Arc<dyn EngineConnector> {
        Arc::new(BudgetTrackingConnector::new(inner, self.ledger))
    }

    fn name(&self) -> &'static str {
        "BudgetTrackingConnector"
    }

    fn config_json(&self) -> serde_json::Value {
        json!({ "shared_ledger": true })
    }
}
