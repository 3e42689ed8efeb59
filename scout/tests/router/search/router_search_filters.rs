use std::sync::Arc;

use scout::{DiscoveryRequest, Scout, SizeBucket};

use crate::helpers::{MockConnector, company};

fn engine() -> Arc<MockConnector> {
    let mut c = MockConnector::named("alpha");
    c.discover_fn = Some(Arc::new(|_| {
        let mut fintech = company("Nimbus", "nimbuspay.io");
        fintech.vertical = Some("Fintech".into());
        fintech.region = Some("EMEA".into());
        fintech.employee_count = Some(40);
        let mut logistics = company("Boxly", "boxly.com");
        logistics.vertical = Some("logistics".into());
        logistics.region = Some("AMER".into());
        logistics.employee_count = Some(4000);
        // No vertical, region, or headcount known.
        let unknown = company("Mystery", "mystery.dev");
        Ok(vec![fintech, logistics, unknown])
    }));
    Arc::new(c)
}

#[tokio::test]
async fn vertical_filter_is_case_insensitive_and_keeps_unknowns() {
    let scout = Scout::builder().with_prepared_engine(engine()).build().unwrap();

    let req = DiscoveryRequest::new("startups")
        .unwrap()
        .with_vertical("fintech");
    let report = scout.search(&req).await.unwrap();

    let domains: Vec<&str> = report.companies.iter().map(|c| c.domain.as_str()).collect();
    assert!(domains.contains(&"nimbuspay.io"));
    assert!(domains.contains(&"mystery.dev"), "unknown vertical survives");
    assert!(!domains.contains(&"boxly.com"));
}

#[tokio::test]
async fn size_filter_buckets_headcount() {
    let scout = Scout::builder().with_prepared_engine(engine()).build().unwrap();

    let req = DiscoveryRequest::new("startups")
        .unwrap()
        .with_size(SizeBucket::Small);
    let report = scout.search(&req).await.unwrap();

    let domains: Vec<&str> = report.companies.iter().map(|c| c.domain.as_str()).collect();
    assert!(domains.contains(&"nimbuspay.io"), "40 heads is Small");
    assert!(domains.contains(&"mystery.dev"), "unknown headcount survives");
    assert!(!domains.contains(&"boxly.com"), "4000 heads is Enterprise");
}

#[tokio::test]
async fn region_filter_applies_before_merge() {
    let scout = Scout::builder().with_prepared_engine(engine()).build().unwrap();

    let req = DiscoveryRequest::new("startups").unwrap().with_region("emea");
    let report = scout.search(&req).await.unwrap();

    let domains: Vec<&str> = report.companies.iter().map(|c| c.domain.as_str()).collect();
    assert!(domains.contains(&"nimbuspay.io"));
    assert!(!domains.contains(&"boxly.com"), "region known and different");
}
