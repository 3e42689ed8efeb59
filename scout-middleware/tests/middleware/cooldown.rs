use std::sync::Arc;
use std::time::Duration;

use scout_core::{DiscoveryRequest, ScoutError};
use scout_middleware::ConnectorBuilder;
use scout_mock::MockEngine;

#[tokio::test(start_paused = true)]
async fn auth_failure_benches_the_engine() {
    let wrapped = ConnectorBuilder::new(Arc::new(MockEngine::new("mock")))
        .with_cooldown(Duration::from_secs(600))
        .build()
        .expect("valid stack");
    let provider = wrapped.as_discovery_provider().expect("discovery");

    // Trip the cooldown.
    let res = provider
        .discover(&DiscoveryRequest::new("AUTH expired").expect("query"))
        .await;
    assert!(matches!(res, Err(ScoutError::AuthFailed { status: 401 })));

    // A perfectly good query now fails fast without reaching the engine.
    let res = provider
        .discover(&DiscoveryRequest::new("fintech").expect("query"))
        .await;
    match res {
        Err(ScoutError::CoolingDown { reset_in_ms }) => assert!(reset_in_ms <= 600_000),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn cooldown_expires() {
    let wrapped = ConnectorBuilder::new(Arc::new(MockEngine::new("mock")))
        .with_cooldown(Duration::from_secs(600))
        .build()
        .expect("valid stack");
    let provider = wrapped.as_discovery_provider().expect("discovery");

    let _ = provider
        .discover(&DiscoveryRequest::new("AUTH expired").expect("query"))
        .await;
    tokio::time::advance(Duration::from_secs(601)).await;

    let res = provider
        .discover(&DiscoveryRequest::new("fintech").expect("query"))
        .await;
    assert!(res.is_ok(), "cooldown should have lapsed: {res:?}");
}

#[tokio::test]
async fn other_errors_do_not_trigger_cooldown() {
    let wrapped = ConnectorBuilder::new(Arc::new(MockEngine::new("mock")))
        .with_cooldown(Duration::from_secs(600))
        .build()
        .expect("valid stack");
    let provider = wrapped.as_discovery_provider().expect("discovery");

    let _ = provider
        .discover(&DiscoveryRequest::new("FAIL this one").expect("query"))
        .await;
    let res = provider
        .discover(&DiscoveryRequest::new("fintech").expect("query"))
        .await;
    assert!(res.is_ok());
}
