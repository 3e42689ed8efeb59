use std::sync::Arc;
use std::time::Duration;

use scout::{DiscoveryRequest, RetryConfig, Scout, ScoutConfig, ScoutError};
use scout_mock::MockEngine;

fn no_retry_config() -> ScoutConfig {
    ScoutConfig {
        retry: RetryConfig {
            max_retries: 0,
            ..RetryConfig::default()
        },
        provider_timeout: Duration::from_millis(10),
        ..ScoutConfig::default()
    }
}

#[tokio::test(start_paused = true)]
async fn request_deadline_bounds_the_whole_search() {
    let scout = Scout::builder()
        .with_prepared_engine(Arc::new(MockEngine::new("slow")))
        // Per-provider deadline stays at its generous default, so the
        // request-level deadline is the one that fires.
        .config(ScoutConfig {
            request_timeout: Some(Duration::from_millis(50)),
            retry: RetryConfig {
                max_retries: 0,
                ..RetryConfig::default()
            },
            ..ScoutConfig::default()
        })
        .build()
        .unwrap();

    // The magic marker makes the engine hang forever.
    let req = DiscoveryRequest::new("TIMEOUT payments").unwrap();
    let res = scout.search(&req).await;
    assert!(matches!(
        res,
        Err(ScoutError::RequestTimeout { capability }) if capability == "discovery"
    ));
}

#[tokio::test(start_paused = true)]
async fn hanging_engines_degrade_to_timeout_warnings() {
    let scout = Scout::builder()
        .with_prepared_engine(Arc::new(MockEngine::new("slow")))
        .config(no_retry_config())
        .build()
        .unwrap();

    let req = DiscoveryRequest::new("TIMEOUT payments").unwrap();
    let report = scout.search(&req).await.unwrap();
    assert!(report.companies.is_empty());
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(report.warnings[0], ScoutError::Timeout { .. }));
}
