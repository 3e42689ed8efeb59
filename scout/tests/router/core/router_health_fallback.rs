use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use scout::{
    HealthConfig, HealthState, NameLookupRequest, RetryConfig, Scout, ScoutConfig, ScoutError,
};

use crate::helpers::{MockConnector, company};

/// Health reacts per call: snapshot caching off, retries off.
fn reactive_config() -> ScoutConfig {
    ScoutConfig {
        retry: RetryConfig {
            max_retries: 0,
            ..RetryConfig::default()
        },
        health: HealthConfig {
            snapshot_ttl: Duration::ZERO,
            ..HealthConfig::default()
        },
        ..ScoutConfig::default()
    }
}

#[tokio::test]
async fn failing_engine_is_demoted_after_going_down() {
    let a_calls = Arc::new(AtomicU32::new(0));
    let b_calls = Arc::new(AtomicU32::new(0));

    let mut a = MockConnector::named("a");
    {
        let calls = Arc::clone(&a_calls);
        a.lookup_fn = Some(Arc::new(move |_req| {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(ScoutError::Http { status: 500 })
        }));
    }
    let mut b = MockConnector::named("b");
    {
        let calls = Arc::clone(&b_calls);
        b.lookup_fn = Some(Arc::new(move |req| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![company(req.name(), "nimbuspay.io")])
        }));
    }

    let scout = Scout::builder()
        .with_engine(Arc::new(a))
        .with_engine(Arc::new(b))
        .config(reactive_config())
        .build()
        .unwrap();

    // First call: "a" leads on registration order, fails, and "b" answers.
    let one = scout
        .lookup_company(&NameLookupRequest::new("One").unwrap())
        .await
        .unwrap();
    assert_eq!(one[0].domain.as_str(), "nimbuspay.io");
    assert_eq!(a_calls.load(Ordering::SeqCst), 1);
    assert_eq!(b_calls.load(Ordering::SeqCst), 1);

    // "a" is now down, so the second call routes straight to "b".
    let two = scout
        .lookup_company(&NameLookupRequest::new("Two").unwrap())
        .await
        .unwrap();
    assert_eq!(two[0].domain.as_str(), "nimbuspay.io");
    assert_eq!(a_calls.load(Ordering::SeqCst), 1);
    assert_eq!(b_calls.load(Ordering::SeqCst), 2);

    let health = scout.provider_health();
    let a_health = health.iter().find(|h| h.engine == "a").unwrap();
    assert_eq!(a_health.state, HealthState::Down);
    assert_eq!(a_health.failed_calls, 1);
    let b_health = health.iter().find(|h| h.engine == "b").unwrap();
    assert_eq!(b_health.state, HealthState::Healthy);
}
