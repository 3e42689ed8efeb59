// Re-export helpers so tests can `use helpers::*;`
pub mod mock_connector;

pub use mock_connector::MockConnector;

use scout_core::{CompanyRecord, ContactSummary, CrmStatus, Domain};

// ---------- Lightweight fixtures and helpers for tests ----------

/// Common domain constants used across tests.
pub const ACME: &str = "acme.com";
pub const NIMBUS: &str = "nimbuspay.io";
pub const VERTEX: &str = "vertexlabs.co";

#[allow(dead_code)]
pub fn domain(s: &str) -> Domain {
    Domain::parse(s).expect("valid test domain")
}

#[allow(dead_code)]
pub fn company(name: &str, dom: &str) -> CompanyRecord {
    CompanyRecord::new(name, domain(dom))
}

#[allow(dead_code)]
pub fn contact_summary(dom: &str, total: u32) -> ContactSummary {
    ContactSummary {
        domain: domain(dom),
        total,
        titles: vec!["VP Sales".into()],
        sample_emails: vec![format!("pat@{dom}")],
    }
}

#[allow(dead_code)]
pub fn not_tracked() -> CrmStatus {
    CrmStatus::not_tracked()
}
