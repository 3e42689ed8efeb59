//! Auth-failure cooldown.
//!
//! A provider that rejects our credentials will keep rejecting them; retrying
//! burns budget and pollutes health stats. On [`ScoutError::AuthFailed`] this
//! layer benches the engine for a fixed period, answering every call with
//! [`ScoutError::CoolingDown`] until the period elapses.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::time::Instant;

use scout_core::connector::EngineConnector;
use scout_core::{CallContext, CallHooks, Middleware, ScoutError};

/// Wrapper that benches its inner connector after an authentication failure.
pub struct CooldownConnector {
    inner: Arc<dyn EngineConnector>,
    until: Mutex<Option<Instant>>,
    period: Duration,
}

#[scout_macros::delegate_connector(inner)]
#[scout_macros::delegate_all_providers(inner)]
impl CooldownConnector {
    /// Wrap `inner` with the given cooldown period.
    #[must_use]
    pub fn new(inner: Arc<dyn EngineConnector>, period: Duration) -> Self {
        Self {
            inner,
            until: Mutex::new(None),
            period,
        }
    }

    fn remaining(&self) -> Option<Duration> {
        let mut guard = self.until.lock().expect("mutex poisoned");
        if let Some(until) = *guard {
            let now = Instant::now();
            if now < until {
                return Some(until - now);
            }
            // expired
            *guard = None;
        }
        None
    }
}

#[async_trait]
impl CallHooks for CooldownConnector {
    async fn pre_call(&self, _ctx: &CallContext) -> Result<(), ScoutError> {
        if let Some(remaining) = self.remaining() {
            return Err(ScoutError::CoolingDown {
                reset_in_ms: u64::try_from(remaining.as_millis()).unwrap_or(u64::MAX),
            });
        }
        Ok(())
    }

    fn map_error(&self, _ctx: &CallContext, err: ScoutError) -> ScoutError {
        if matches!(err, ScoutError::AuthFailed { .. }) {
            let mut guard = self.until.lock().expect("mutex poisoned");
            *guard = Some(Instant::now() + self.period);
        }
        err
    }
}

/// [`Middleware`] factory for [`CooldownConnector`].
pub struct CooldownMiddleware {
    period: Duration,
}

impl CooldownMiddleware {
    /// Cooldown layer with the given bench period.
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self { period }
    }
}

impl Middleware for CooldownMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn EngineConnector>) -> Arc<dyn EngineConnector> {
        Arc::new(CooldownConnector::new(inner, self.period))
    }

    fn name(&self) -> &'static str {
        "CooldownConnector"
    }

    fn config_json(&self) -> serde_json::Value {
        json!({ "period_ms": u64::try_from(self.period.as_millis()).unwrap_or(u64::MAX) })
    }
}
