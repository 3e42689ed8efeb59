//! Canned companies used by the fixture-backed mock engine.

use chrono::Utc;

use scout_core::{CompanyRecord, Domain};

fn company(
    name: &str,
    domain: &str,
    vertical: &str,
    region: &str,
    employees: u32,
    relevance: f64,
) -> CompanyRecord {
    let mut c = CompanyRecord::new(name, Domain::parse(domain).expect("fixture domain"));
    c.vertical = Some(vertical.to_string());
    c.region = Some(region.to_string());
    c.employee_count = Some(employees);
    c.relevance = Some(relevance);
    c.description = Some(format!("{name} builds {vertical} products."));
    c.last_refreshed = Utc::now();
    c
}

/// The default fixture set: a handful of plausible prospects across
/// verticals and sizes.
#[must_use]
pub fn companies() -> Vec<CompanyRecord> {
    vec![
        company("Acme Analytics", "acme.com", "fintech", "Europe", 120, 0.92),
        company("Nimbus Robotics", "nimbus.dev", "robotics", "North America", 45, 0.81),
        company(
            "Widget Works",
            "widgets.co.uk",
            "manufacturing",
            "Europe",
            340,
            0.74,
        ),
        company("Orbital Health", "orbital.health", "healthtech", "Europe", 80, 0.67),
        company("Tidal Data", "tidaldata.io", "fintech", "APAC", 15, 0.58),
    ]
}
