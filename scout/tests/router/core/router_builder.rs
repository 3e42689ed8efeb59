use std::sync::Arc;

use scout::{Capability, NameLookupRequest, RoutingPolicy, Scout, ScoutError};

use crate::helpers::{MockConnector, company};

#[test]
fn build_requires_at_least_one_engine() {
    let res = Scout::builder().build();
    assert!(matches!(res, Err(ScoutError::InvalidArg(_))));
}

#[tokio::test]
async fn routing_keys_for_unregistered_engines_are_ignored() {
    let mut a = MockConnector::named("a");
    a.lookup_fn = Some(Arc::new(|_req| Ok(vec![company("Acme", "acme.com")])));

    let scout = Scout::builder()
        .with_prepared_engine(Arc::new(a))
        .routing_policy(RoutingPolicy::new().prefer(Capability::NameLookup, ["ghost", "a"]))
        .build()
        .unwrap();

    let req = NameLookupRequest::new("Acme").unwrap();
    let found = scout.lookup_company(&req).await.unwrap();
    assert_eq!(found[0].domain.as_str(), "acme.com");
}
