use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Domain;

/// A company surfaced by discovery or lookup, possibly enriched and scored.
///
/// Records from different providers describing the same company are merged by
/// root domain; see the de-duplication rules in `scout-core`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Display name of the company.
    pub name: String,
    /// Canonical web domain.
    pub domain: Domain,
    /// Short description or tagline, when the provider supplied one.
    pub description: Option<String>,
    /// Industry vertical (free text, provider vocabulary).
    pub vertical: Option<String>,
    /// Headquarters region or country.
    pub region: Option<String>,
    /// Approximate headcount.
    pub employee_count: Option<u32>,
    /// Estimated annual revenue in USD.
    pub revenue_usd: Option<u64>,
    /// Year the company was founded.
    pub founded_year: Option<u16>,
    /// Main phone number.
    pub phone: Option<String>,
    /// Logo URL.
    pub logo_url: Option<String>,
    /// Provider-reported relevance to the originating query, in `[0, 1]`.
    pub relevance: Option<f64>,
    /// Whether the provider flagged this as an exact match for a name lookup.
    pub exact_match: bool,
    /// Names of the engines that contributed to this record, in contribution order.
    pub sources: Vec<String>,
    /// Buying signals attached to this company.
    pub signals: Vec<Signal>,
    /// Number of reachable contacts, when contact enrichment ran.
    pub contact_count: Option<u32>,
    /// CRM standing, when a CRM lookup ran.
    pub crm: Option<CrmStatus>,
    /// Fit score, when scoring ran.
    pub fit: Option<FitScore>,
    /// When this record was last fetched or merged.
    pub last_refreshed: DateTime<Utc>,
}

impl CompanyRecord {
    /// Minimal record with only the identity fields set.
    #[must_use]
    pub fn new(name: impl Into<String>, domain: Domain) -> Self {
        Self {
            name: name.into(),
            domain,
            description: None,
            vertical: None,
            region: None,
            employee_count: None,
            revenue_usd: None,
            founded_year: None,
            phone: None,
            logo_url: None,
            relevance: None,
            exact_match: false,
            sources: Vec::new(),
            signals: Vec::new(),
            contact_count: None,
            crm: None,
            fit: None,
            last_refreshed: Utc::now(),
        }
    }
}

/// Company headcount bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeBucket {
    /// 1-10 employees.
    Micro,
    /// 11-50 employees.
    Small,
    /// 51-200 employees.
    Mid,
    /// 201-1000 employees.
    Large,
    /// More than 1000 employees.
    Enterprise,
}

impl SizeBucket {
    /// Bucket a raw headcount.
    #[must_use]
    pub const fn from_employee_count(count: u32) -> Self {
        match count {
            0..=10 => Self::Micro,
            11..=50 => Self::Small,
            51..=200 => Self::Mid,
            201..=1000 => Self::Large,
            _ => Self::Enterprise,
        }
    }
}

/// A single observed buying signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Stable identifier; used for de-duplicating signals across merges.
    pub id: String,
    /// What kind of signal this is.
    pub kind: SignalKind,
    /// Short headline.
    pub title: String,
    /// Longer summary, when available.
    pub summary: Option<String>,
    /// Source URL, when available.
    pub url: Option<String>,
    /// Name of the engine that produced the signal.
    pub source: String,
    /// When the signal was observed.
    pub observed_at: DateTime<Utc>,
}

/// Taxonomy of buying signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum SignalKind {
    /// The company is hiring for relevant roles.
    Hiring,
    /// The company raised funding.
    Funding,
    /// The company is expanding (offices, markets).
    Expansion,
    /// A leadership change.
    Leadership,
    /// A product launch.
    ProductLaunch,
    /// Notable press coverage.
    News,
    /// Anything that does not fit the above.
    Other,
}

impl SignalKind {
    /// Whether this kind counts as a buying signal for scoring purposes.
    #[must_use]
    pub const fn is_buying_signal(self) -> bool {
        matches!(self, Self::Hiring | Self::Funding | Self::Expansion)
    }
}

/// Result of scoring a company against the target criteria.
///
/// `score` is clamped to `[0, 100]`; `breakdown` keeps the true unclamped
/// point contributions so the clamping is auditable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitScore {
    /// Final score in `[0, 100]`.
    pub score: u8,
    /// Per-factor contributions, positives first (descending), then
    /// negatives by magnitude.
    pub breakdown: Vec<ScoreFactor>,
}

/// One factor in a fit score breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreFactor {
    /// What was evaluated.
    pub label: String,
    /// Signed point contribution, before clamping.
    pub points: f64,
    /// Whether the factor matched.
    pub matched: bool,
}

/// Aggregate view of contacts reachable at a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSummary {
    /// The company domain the contacts belong to.
    pub domain: Domain,
    /// Total number of contacts found.
    pub total: u32,
    /// Sample of job titles.
    pub titles: Vec<String>,
    /// Sample of email addresses.
    pub sample_emails: Vec<String>,
}

/// Deliverability verdict for a single email address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailVerdict {
    /// The address that was verified.
    pub email: String,
    /// The verdict.
    pub outcome: EmailOutcome,
    /// Provider confidence in `[0, 1]`, when reported.
    pub confidence: Option<f64>,
}

/// Deliverability classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailOutcome {
    /// Mail to this address will be accepted.
    Deliverable,
    /// Mail to this address will bounce.
    Undeliverable,
    /// Catch-all or otherwise uncertain.
    Risky,
    /// The provider could not determine deliverability.
    Unknown,
}

/// A company's standing in the CRM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrmStatus {
    /// Lifecycle standing.
    pub standing: CrmStanding,
    /// Assigned owner, when tracked.
    pub owner: Option<String>,
    /// Last recorded activity.
    pub last_activity: Option<DateTime<Utc>>,
}

impl CrmStatus {
    /// Status for a company the CRM has never seen.
    #[must_use]
    pub const fn not_tracked() -> Self {
        Self {
            standing: CrmStanding::NotTracked,
            owner: None,
            last_activity: None,
        }
    }
}

/// CRM lifecycle stages, collapsed to what routing and scoring care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrmStanding {
    /// Not present in the CRM.
    NotTracked,
    /// An active lead being worked.
    ActiveLead,
    /// An open opportunity.
    OpenOpportunity,
    /// An existing customer.
    Customer,
    /// A former customer.
    Churned,
}
