use scout_core::connector::EngineConnector;
use scout_core::{CacheTtlConfig, DiscoveryRequest};
use scout_middleware::{CacheStores, CachingConnector};
use scout_mock::dynamic::{DynamicMockEngine, MockBehavior};
use scout_mock::fixtures;

#[tokio::test]
async fn identical_discovery_is_served_from_cache() {
    let (engine, controller) = DynamicMockEngine::new_with_controller("dyn");
    controller
        .set_discovery_behavior("fintech", MockBehavior::Return(fixtures::companies()))
        .await;

    let cached = CachingConnector::new(engine, CacheStores::lru(&CacheTtlConfig::default()));
    let provider = cached.as_discovery_provider().expect("discovery");

    let req = DiscoveryRequest::new("fintech").expect("query");
    let first = provider.discover(&req).await.expect("first call");
    let second = provider.discover(&req).await.expect("second call");

    assert_eq!(first, second);
    assert_eq!(controller.call_count(), 1);
}

#[tokio::test]
async fn different_queries_do_not_share_entries() {
    let (engine, controller) = DynamicMockEngine::new_with_controller("dyn");
    controller
        .set_discovery_behavior("fintech", MockBehavior::Return(fixtures::companies()))
        .await;
    controller
        .set_discovery_behavior("robotics", MockBehavior::Return(Vec::new()))
        .await;

    let cached = CachingConnector::new(engine, CacheStores::lru(&CacheTtlConfig::default()));
    let provider = cached.as_discovery_provider().expect("discovery");

    provider
        .discover(&DiscoveryRequest::new("fintech").expect("query"))
        .await
        .expect("fintech");
    provider
        .discover(&DiscoveryRequest::new("robotics").expect("query"))
        .await
        .expect("robotics");

    assert_eq!(controller.call_count(), 2);
}

#[tokio::test]
async fn errors_are_not_cached() {
    let (engine, controller) = DynamicMockEngine::new_with_controller("dyn");
    controller
        .set_discovery_behavior(
            "flaky",
            MockBehavior::Fail(scout_core::ScoutError::Http { status: 503 }),
        )
        .await;

    let cached = CachingConnector::new(engine, CacheStores::lru(&CacheTtlConfig::default()));
    let provider = cached.as_discovery_provider().expect("discovery");
    let req = DiscoveryRequest::new("flaky").expect("query");

    assert!(provider.discover(&req).await.is_err());
    controller
        .set_discovery_behavior("flaky", MockBehavior::Return(Vec::new()))
        .await;
    assert!(provider.discover(&req).await.is_ok());
    assert_eq!(controller.call_count(), 2);
}
