use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use scout::{Capability, NameLookupRequest, RoutingPolicy, Scout};

use crate::helpers::{MockConnector, company};

fn counted_lookup(
    name: &'static str,
    domain: &'static str,
    calls: &Arc<AtomicU32>,
) -> Arc<MockConnector> {
    let mut c = MockConnector::named(name);
    let calls = Arc::clone(calls);
    c.lookup_fn = Some(Arc::new(move |req| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![company(req.name(), domain)])
    }));
    Arc::new(c)
}

#[tokio::test]
async fn policy_order_is_applied() {
    let a_calls = Arc::new(AtomicU32::new(0));
    let b_calls = Arc::new(AtomicU32::new(0));
    let a = counted_lookup("a", "acme.com", &a_calls);
    let b = counted_lookup("b", "nimbuspay.io", &b_calls);

    let scout = Scout::builder()
        .with_prepared_engine(a)
        .with_prepared_engine(b)
        .routing_policy(RoutingPolicy::new().prefer(Capability::NameLookup, ["b", "a"]))
        .build()
        .unwrap();

    let req = NameLookupRequest::new("Nimbus").unwrap();
    let found = scout.lookup_company(&req).await.unwrap();

    assert_eq!(found[0].domain.as_str(), "nimbuspay.io");
    assert_eq!(b_calls.load(Ordering::SeqCst), 1);
    assert_eq!(a_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn registration_order_breaks_ties_without_a_policy() {
    let a_calls = Arc::new(AtomicU32::new(0));
    let b_calls = Arc::new(AtomicU32::new(0));
    let a = counted_lookup("a", "acme.com", &a_calls);
    let b = counted_lookup("b", "nimbuspay.io", &b_calls);

    let scout = Scout::builder()
        .with_prepared_engine(a)
        .with_prepared_engine(b)
        .build()
        .unwrap();

    let req = NameLookupRequest::new("Acme").unwrap();
    let found = scout.lookup_company(&req).await.unwrap();

    assert_eq!(found[0].domain.as_str(), "acme.com");
    assert_eq!(a_calls.load(Ordering::SeqCst), 1);
    assert_eq!(b_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unlisted_engines_rank_after_listed_ones() {
    let a_calls = Arc::new(AtomicU32::new(0));
    let b_calls = Arc::new(AtomicU32::new(0));
    let a = counted_lookup("a", "acme.com", &a_calls);
    let b = counted_lookup("b", "nimbuspay.io", &b_calls);

    // Only "b" is listed; "a" stays eligible but ranks after it.
    let scout = Scout::builder()
        .with_prepared_engine(a)
        .with_prepared_engine(b)
        .routing_policy(RoutingPolicy::new().prefer(Capability::NameLookup, ["b"]))
        .build()
        .unwrap();

    let req = NameLookupRequest::new("Nimbus").unwrap();
    let found = scout.lookup_company(&req).await.unwrap();

    assert_eq!(found[0].domain.as_str(), "nimbuspay.io");
    assert_eq!(a_calls.load(Ordering::SeqCst), 0);
}
