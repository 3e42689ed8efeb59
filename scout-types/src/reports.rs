use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScoutError;
use crate::records::{CompanyRecord, Signal};

/// The final product of a discovery search: ranked companies, a flattened
/// signal feed, and any non-fatal provider failures encountered along the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    /// Companies ranked by fit score (descending), ties broken by domain.
    pub companies: Vec<CompanyRecord>,
    /// All signals across all companies, newest first.
    pub signals: Vec<Signal>,
    /// Provider failures that were absorbed rather than failing the search.
    pub warnings: Vec<ScoutError>,
}

/// Health classification of an engine over an observation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    /// Failure rate below the degraded threshold (or no calls observed).
    Healthy,
    /// Failure rate between the degraded and down thresholds.
    Degraded,
    /// Failure rate at or above the down threshold.
    Down,
}

impl HealthState {
    /// Routing rank: lower is preferred.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Healthy => 0,
            Self::Degraded => 1,
            Self::Down => 2,
        }
    }
}

/// Health report for one engine over one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderHealth {
    /// Engine name.
    pub engine: String,
    /// Classification over the window.
    pub state: HealthState,
    /// Calls observed in the window.
    pub total_calls: u64,
    /// Failed calls observed in the window.
    pub failed_calls: u64,
    /// `failed_calls / total_calls`, or `0.0` when no calls were observed.
    pub failure_rate: f64,
    /// Mean call latency in the window, when any calls were observed.
    pub avg_latency_ms: Option<u64>,
    /// When the engine last completed a call successfully, if it has.
    pub last_success: Option<DateTime<Utc>>,
    /// Remaining rate-limit quota, when the engine has reported one.
    pub rate_limit_remaining: Option<u32>,
    /// Window length in seconds.
    pub window_secs: u64,
}

/// Budget consumption for one engine on one UTC day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetState {
    /// Engine name.
    pub engine: String,
    /// The UTC day the counters cover.
    pub day: NaiveDate,
    /// Outbound calls made so far today.
    pub used: u64,
    /// Configured daily limit, when one is set.
    pub limit: Option<u64>,
    /// Calls remaining today, when a limit is set.
    pub remaining: Option<u64>,
}
