use std::sync::Arc;
use std::time::Duration;

use scout_core::{CacheTtlConfig, DiscoveryRequest, RetryConfig, ScoutError};
use scout_middleware::{ConnectorBuilder, UsageLedger};
use scout_mock::MockEngine;

#[tokio::test]
async fn cache_hits_are_never_charged() {
    let ledger = Arc::new(UsageLedger::new());
    let wrapped = ConnectorBuilder::new(Arc::new(MockEngine::new("mock")))
        .with_budget(Arc::clone(&ledger))
        .with_cache(CacheTtlConfig::default())
        .build()
        .expect("valid stack");

    let provider = wrapped.as_discovery_provider().expect("discovery");
    let req = DiscoveryRequest::new("fintech").expect("query");

    provider.discover(&req).await.expect("first call");
    provider.discover(&req).await.expect("cached call");
    provider.discover(&req).await.expect("cached call");

    assert_eq!(ledger.used_today("mock"), 1);
}

#[tokio::test]
async fn distinct_queries_each_charge_once() {
    let ledger = Arc::new(UsageLedger::new());
    let wrapped = ConnectorBuilder::new(Arc::new(MockEngine::new("mock")))
        .with_budget(Arc::clone(&ledger))
        .with_cache(CacheTtlConfig::default())
        .build()
        .expect("valid stack");

    let provider = wrapped.as_discovery_provider().expect("discovery");
    provider
        .discover(&DiscoveryRequest::new("fintech").expect("query"))
        .await
        .expect("call");
    provider
        .discover(&DiscoveryRequest::new("robotics").expect("query"))
        .await
        .expect("call");

    assert_eq!(ledger.used_today("mock"), 2);
}

#[tokio::test]
async fn failed_calls_still_count_against_budget() {
    let ledger = Arc::new(UsageLedger::new());
    let wrapped = ConnectorBuilder::new(Arc::new(MockEngine::new("mock")))
        .with_budget(Arc::clone(&ledger))
        .build()
        .expect("valid stack");

    let provider = wrapped.as_discovery_provider().expect("discovery");
    let req = DiscoveryRequest::new("FAIL please").expect("query");
    assert!(provider.discover(&req).await.is_err());
    assert_eq!(ledger.used_today("mock"), 1);
}

#[tokio::test(start_paused = true)]
async fn every_retry_attempt_is_charged() {
    let ledger = Arc::new(UsageLedger::new());
    let wrapped = ConnectorBuilder::new(Arc::new(MockEngine::new("mock")))
        .with_budget(Arc::clone(&ledger))
        .with_resilience(
            RetryConfig {
                max_retries: 2,
                jitter_percent: 0,
                ..RetryConfig::default()
            },
            Duration::from_secs(10),
        )
        .build()
        .expect("valid stack");

    let provider = wrapped.as_discovery_provider().expect("discovery");
    // The magic marker makes every attempt fail with a retryable error.
    let req = DiscoveryRequest::new("RATE_LIMIT fintech").expect("query");
    let res = provider.discover(&req).await;
    assert!(matches!(res, Err(ScoutError::RateLimited { .. })));

    // One initial attempt plus two retries, each a real outbound call.
    assert_eq!(ledger.used_today("mock"), 3);
}
