use std::sync::Arc;
use std::time::Duration;

use scout_core::{DiscoveryRequest, RetryConfig, ScoutError};
use scout_middleware::ConnectorBuilder;
use scout_mock::dynamic::{DynamicMockEngine, MockBehavior};
use scout_mock::{MockEngine, fixtures};

#[tokio::test(start_paused = true)]
async fn hanging_provider_times_out_with_label() {
    let (engine, controller) = DynamicMockEngine::new_with_controller("stalled");
    controller
        .set_discovery_behavior("anything", MockBehavior::Hang)
        .await;

    let wrapped = ConnectorBuilder::new(engine)
        .with_resilience(
            RetryConfig {
                max_retries: 0,
                ..RetryConfig::default()
            },
            Duration::from_millis(50),
        )
        .build()
        .expect("valid stack");

    let res = wrapped
        .as_discovery_provider()
        .expect("discovery")
        .discover(&DiscoveryRequest::new("anything").expect("query"))
        .await;
    match res {
        Err(ScoutError::Timeout { label, ms }) => {
            assert_eq!(label, "stalled discovery");
            assert_eq!(ms, 50);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn rate_limit_is_retried() {
    let (engine, controller) = DynamicMockEngine::new_with_controller("flaky");
    controller
        .set_discovery_behavior(
            "bursty",
            MockBehavior::Fail(ScoutError::RateLimited { retry_after_ms: 10 }),
        )
        .await;

    let wrapped = ConnectorBuilder::new(engine)
        .with_resilience(RetryConfig::default(), Duration::from_secs(5))
        .build()
        .expect("valid stack");

    let res = wrapped
        .as_discovery_provider()
        .expect("discovery")
        .discover(&DiscoveryRequest::new("bursty").expect("query"))
        .await;
    assert!(matches!(res, Err(ScoutError::RateLimited { .. })));
    // Initial attempt plus two retries.
    assert_eq!(controller.call_count(), 3);
}

#[tokio::test]
async fn auth_failure_is_not_retried_and_successes_pass_through() {
    let wrapped = ConnectorBuilder::new(Arc::new(MockEngine::with_companies(
        "mock",
        fixtures::companies(),
    )))
    .with_resilience(RetryConfig::default(), Duration::from_secs(5))
    .build()
    .expect("valid stack");
    let provider = wrapped.as_discovery_provider().expect("discovery");

    let res = provider
        .discover(&DiscoveryRequest::new("AUTH bad key").expect("query"))
        .await;
    assert!(matches!(res, Err(ScoutError::AuthFailed { .. })));

    let ok = provider
        .discover(&DiscoveryRequest::new("fintech").expect("query"))
        .await
        .expect("success");
    assert_eq!(ok.len(), fixtures::companies().len());
}
