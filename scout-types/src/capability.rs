use serde::{Deserialize, Serialize};

/// The set of operations an engine can serve.
///
/// Routing policies, cache namespaces, and health reporting are all keyed by
/// capability, so every routed operation maps to exactly one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Capability {
    /// Free-text company discovery.
    Discovery,
    /// Resolving a company by its exact name.
    NameLookup,
    /// Counting and sampling contacts at a company.
    ContactEnrichment,
    /// Verifying deliverability of a single email address.
    EmailVerification,
    /// Looking up a company's standing in the CRM.
    CrmStatus,
    /// Extracting buying signals from unstructured text.
    SignalExtraction,
}

impl Capability {
    /// Stable string form, used in routing policies and cache keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Discovery => "discovery",
            Self::NameLookup => "name_lookup",
            Self::ContactEnrichment => "contact_enrichment",
            Self::EmailVerification => "email_verification",
            Self::CrmStatus => "crm_status",
            Self::SignalExtraction => "signal_extraction",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
