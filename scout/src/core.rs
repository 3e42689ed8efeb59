use std::sync::Arc;
use std::time::Duration;

use scout_core::connector::EngineConnector;
use scout_core::resilience::{backoff_delay_base, with_timeout};
use scout_core::{
    BudgetConfig, BudgetState, Capability, CompanyRecord, FitScore, ProviderHealth, RetryConfig,
    RoutingPolicy, ScoutConfig, ScoutError, ScoringWeights, TargetCriteria,
};
use scout_middleware::{ConnectorBuilder, HealthTracker, UsageLedger};

use crate::router::state::RouterState;
use crate::router::util::collapse_errors;

/// Orchestrator that routes requests across registered engines.
pub struct Scout {
    pub(crate) engines: Vec<Arc<dyn EngineConnector>>,
    pub(crate) cfg: ScoutConfig,
    pub(crate) state: RouterState,
}

enum Registration {
    /// Wrapped in the standard middleware stack at build time.
    Raw(Arc<dyn EngineConnector>),
    /// Used exactly as given; the caller owns the middleware composition.
    Prepared(Arc<dyn EngineConnector>),
}

/// Builder for constructing a `Scout` orchestrator with custom configuration.
pub struct ScoutBuilder {
    engines: Vec<Registration>,
    cfg: ScoutConfig,
}

impl Default for ScoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoutBuilder {
    /// Create a new builder with sensible defaults.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no engines; you must register at least one via
    ///   [`with_engine`](Self::with_engine).
    /// - Defaults are conservative: registration-order routing, two retries
    ///   with exponential backoff, a 10s per-provider deadline, and no
    ///   end-to-end request deadline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            engines: vec![],
            cfg: ScoutConfig::default(),
        }
    }

    /// Register an engine, to be wrapped in the standard middleware stack
    /// (cache, cooldown, health, resilience, budget) at build time.
    ///
    /// Behavior and trade-offs:
    /// - Registration order is the routing tiebreaker when health, budget,
    ///   and policy rank engines equally.
    /// - Multiple engines can serve the same capability; the router orders
    ///   them per request.
    /// - Duplicates are not deduplicated; avoid registering the same engine
    ///   twice.
    #[must_use]
    pub fn with_engine(mut self, engine: Arc<dyn EngineConnector>) -> Self {
        self.engines.push(Registration::Raw(engine));
        self
    }

    /// Register an engine as-is, without wrapping it in the standard stack.
    ///
    /// Use this when you composed the middleware yourself via
    /// [`ConnectorBuilder`], or in tests that want raw engine behavior. Note
    /// that calls through a bare engine are invisible to health and budget
    /// accounting.
    #[must_use]
    pub fn with_prepared_engine(mut self, engine: Arc<dyn EngineConnector>) -> Self {
        self.engines.push(Registration::Prepared(engine));
        self
    }

    /// Set the per-capability routing policy.
    ///
    /// A policy is advice, not a filter: engines absent from a capability's
    /// list remain eligible, ranked after every listed engine. Health and
    /// budget always take precedence over policy order.
    #[must_use]
    pub fn routing_policy(mut self, policy: RoutingPolicy) -> Self {
        self.cfg.routing = policy;
        self
    }

    /// Set the retry behavior applied by the standard resilience layer.
    #[must_use]
    pub const fn retry(mut self, retry: RetryConfig) -> Self {
        self.cfg.retry = retry;
        self
    }

    /// Set per-engine daily request budgets.
    ///
    /// Over-budget engines are deprioritized in routing, never blocked: a
    /// degraded answer beats no answer.
    #[must_use]
    pub fn budget(mut self, budget: BudgetConfig) -> Self {
        self.cfg.budget = budget;
        self
    }

    /// Set the scoring weights used to rank discovered companies.
    #[must_use]
    pub const fn weights(mut self, weights: ScoringWeights) -> Self {
        self.cfg.weights = weights;
        self
    }

    /// Set the target profile that companies are scored against.
    #[must_use]
    pub fn criteria(mut self, criteria: TargetCriteria) -> Self {
        self.cfg.criteria = criteria;
        self
    }

    /// Set the per-provider call deadline.
    ///
    /// Applied per attempt inside the resilience layer and, scaled to cover
    /// retries, as an outer bound on every routed call.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Set an end-to-end deadline for a whole search request.
    ///
    /// Bounds total latency even when several providers time out in
    /// sequence. When exceeded, [`Scout::search`] returns
    /// [`ScoutError::RequestTimeout`].
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Replace the whole configuration at once.
    #[must_use]
    pub fn config(mut self, cfg: ScoutConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the `Scout` orchestrator.
    ///
    /// Raw engines are wrapped in the standard middleware stack, sharing one
    /// usage ledger and one health tracker so routing sees a global view.
    /// Routing policy keys that name no registered engine are dropped.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no engines have been registered via
    /// [`with_engine`](Self::with_engine).
    pub fn build(mut self) -> Result<Scout, ScoutError> {
        if self.engines.is_empty() {
            return Err(ScoutError::invalid_arg(
                "no engines registered; add at least one via with_engine(...)",
            ));
        }

        let ledger = Arc::new(UsageLedger::new());
        let tracker = Arc::new(HealthTracker::new(self.cfg.health.clone()));

        let mut engines: Vec<Arc<dyn EngineConnector>> = Vec::with_capacity(self.engines.len());
        for registration in self.engines {
            match registration {
                Registration::Prepared(engine) => engines.push(engine),
                Registration::Raw(raw) => engines.push(
                    ConnectorBuilder::standard(
                        raw,
                        self.cfg.cache_ttl.clone(),
                        self.cfg.auth_cooldown,
                        Arc::clone(&ledger),
                        Arc::clone(&tracker),
                        self.cfg.retry.clone(),
                        self.cfg.provider_timeout,
                    )
                    .build()?,
                ),
            }
        }

        let known: Vec<&str> = engines.iter().map(|e| e.name()).collect();
        let dropped = self.cfg.routing.retain_known(&known);
        #[cfg(feature = "tracing")]
        if !dropped.is_empty() {
            tracing::warn!(
                target: "scout::core",
                dropped = ?dropped,
                "routing policy names unregistered engines; ignoring them"
            );
        }
        #[cfg(not(feature = "tracing"))]
        let _ = dropped;

        Ok(Scout {
            engines,
            cfg: self.cfg,
            state: RouterState::new(ledger, tracker),
        })
    }
}

pub fn tag_err(engine: &str, e: ScoutError) -> ScoutError {
    match e {
        e @ (ScoutError::NotFound { .. }
        | ScoutError::Timeout { .. }
        | ScoutError::RequestTimeout { .. }
        | ScoutError::RateLimited { .. }
        | ScoutError::AuthFailed { .. }
        | ScoutError::Http { .. }
        | ScoutError::CoolingDown { .. }
        | ScoutError::Unsupported { .. }
        | ScoutError::Engine { .. }
        | ScoutError::NoProviderAvailable { .. }
        | ScoutError::AllEnginesFailed(_)
        | ScoutError::AllEnginesTimedOut { .. }) => e,
        other => ScoutError::engine(engine, other.to_string()),
    }
}

/// Bound `fut` by an optional end-to-end deadline, mapping expiry to
/// `RequestTimeout` for the given capability.
pub(crate) async fn with_request_deadline<T, Fut>(
    deadline: Option<Duration>,
    capability: Capability,
    fut: Fut,
) -> Result<T, ScoutError>
where
    Fut: core::future::Future<Output = T>,
{
    match deadline {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| ScoutError::request_timeout(capability)),
        None => Ok(fut.await),
    }
}

impl Scout {
    /// Wrap a provider future with a deadline and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "scout::core::provider_call_with_timeout",
            skip(fut),
            fields(
                engine = engine,
                capability = %capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        engine: &'static str,
        capability: Capability,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, ScoutError>
    where
        Fut: core::future::Future<Output = Result<T, ScoutError>>,
    {
        with_timeout(&format!("{engine} {capability}"), timeout, fut).await
    }

    /// Outer per-call bound covering every attempt the resilience layer may
    /// make: one per-attempt deadline per attempt, plus each backoff at its
    /// jitter ceiling. The per-attempt deadline itself lives in the stack.
    pub(crate) fn provider_deadline(&self) -> Duration {
        let retry = &self.cfg.retry;
        let mut deadline = self
            .cfg
            .provider_timeout
            .saturating_mul(retry.max_retries + 1);
        for attempt in 1..=retry.max_retries {
            let backoff = backoff_delay_base(retry, attempt);
            let ceiling = backoff.mul_f64(1.0 + f64::from(retry.jitter_percent) / 100.0);
            deadline = deadline.saturating_add(ceiling);
        }
        deadline
    }

    /// Start building a new `Scout` instance.
    ///
    /// Typical usage chains engine registration and preferences, e.g.:
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use scout::{Capability, RoutingPolicy, Scout};
    ///
    /// let exa = Arc::new(ExaConnector::builder().api_key("...").build()?);
    /// let serper = Arc::new(SerperConnector::builder().api_key("...").build()?);
    ///
    /// let scout = Scout::builder()
    ///     .with_engine(exa)
    ///     .with_engine(serper)
    ///     .routing_policy(RoutingPolicy::new().prefer(Capability::Discovery, ["exa", "serper"]))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> ScoutBuilder {
        ScoutBuilder::new()
    }

    /// Whether any registered engine serves the given capability.
    #[must_use]
    pub fn supports(&self, capability: Capability) -> bool {
        self.engines.iter().any(|e| e.supports(capability))
    }

    /// Health report for every registered engine over the reporting window.
    #[must_use]
    pub fn provider_health(&self) -> Vec<ProviderHealth> {
        self.engines
            .iter()
            .map(|e| {
                self.state
                    .tracker
                    .report(e.name(), self.cfg.health.reporting_window)
            })
            .collect()
    }

    /// Score a company against the configured weights and criteria.
    ///
    /// Pure passthrough to [`scout_core::scoring::score_company`] using this
    /// orchestrator's configuration; `search` applies it automatically.
    #[must_use]
    pub fn score(&self, company: &CompanyRecord) -> FitScore {
        scout_core::scoring::score_company(company, &self.cfg.weights, &self.cfg.criteria)
    }

    /// Collapse duplicate companies by root domain.
    ///
    /// Pure passthrough to [`scout_core::dedup::dedupe_companies_with`] using
    /// the configured recency weight; `search` applies it automatically.
    #[must_use]
    pub fn dedupe(&self, companies: Vec<CompanyRecord>) -> Vec<CompanyRecord> {
        scout_core::dedup::dedupe_companies_with(companies, self.cfg.recency_weight)
    }

    /// Today's budget consumption for every registered engine.
    #[must_use]
    pub fn budget_state(&self) -> Vec<BudgetState> {
        self.engines
            .iter()
            .map(|e| {
                self.state
                    .ledger
                    .state(e.name(), self.cfg.budget.limit_for(e.name()))
            })
            .collect()
    }

    /// Generic single-result fetch: walk eligible engines in routing order,
    /// return the first success.
    ///
    /// - Applies the outer per-call deadline to every attempt
    /// - Aggregates errors; `NotFound` is tracked separately so an
    ///   all-not-found outcome surfaces as `NotFound` rather than a failure
    /// - Returns `NoProviderAvailable` when no engine serves the capability
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "scout::core::fetch_single",
            skip(self, call),
            fields(capability = %capability),
        )
    )]
    pub(crate) async fn fetch_single<T, F, Fut>(
        &self,
        capability: Capability,
        not_found_what: Option<String>,
        call: F,
    ) -> Result<T, ScoutError>
    where
        T: Send,
        F: Fn(Arc<dyn EngineConnector>) -> Fut,
        Fut: core::future::Future<Output = Result<T, ScoutError>> + Send,
    {
        let mut attempted_any = false;
        let mut errors: Vec<ScoutError> = Vec::new();
        let deadline = self.provider_deadline();

        for engine in self.ordered_for(capability) {
            let name = engine.name();
            attempted_any = true;
            match Self::provider_call_with_timeout(name, capability, deadline, call(engine)).await {
                Ok(v) => return Ok(v),
                Err(e @ (ScoutError::NotFound { .. } | ScoutError::Timeout { .. })) => {
                    errors.push(e);
                }
                Err(e) => errors.push(tag_err(name, e)),
            }
        }

        Err(collapse_errors(
            capability,
            attempted_any,
            errors,
            not_found_what,
        ))
    }
}
