use std::sync::Arc;
use std::time::Duration;

use scout_core::{CacheTtlConfig, HealthConfig, RetryConfig, ScoutError};
use scout_middleware::{ConnectorBuilder, HealthTracker, UsageLedger};
use scout_mock::MockEngine;

#[test]
fn standard_stack_exports_canonical_order() {
    let builder = ConnectorBuilder::standard(
        Arc::new(MockEngine::new("mock")),
        CacheTtlConfig::default(),
        Duration::from_secs(600),
        Arc::new(UsageLedger::new()),
        Arc::new(HealthTracker::new(HealthConfig::default())),
        RetryConfig::default(),
        Duration::from_secs(10),
    );

    let stack = builder.to_stack();
    let names: Vec<&str> = stack.layers.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "CachingConnector",
            "CooldownConnector",
            "HealthRecordingConnector",
            "ResilientConnector",
            "BudgetTrackingConnector",
            "RawConnector",
        ]
    );

    let raw = builder.to_stack().layers.last().cloned().expect("raw layer");
    assert_eq!(raw.config["name"], "mock");
}

#[test]
fn misordered_layers_are_rejected() {
    // Budget outside the cache would charge for cache hits.
    let res = ConnectorBuilder::new(Arc::new(MockEngine::new("mock")))
        .with_cache(CacheTtlConfig::default())
        .with_budget(Arc::new(UsageLedger::new()))
        .build();
    match res {
        Err(ScoutError::InvalidMiddlewareStack { message }) => {
            assert!(message.contains("CachingConnector"), "{message}");
            assert!(message.contains("BudgetTrackingConnector"), "{message}");
        }
        Ok(_) => panic!("misordered stack was accepted"),
        Err(other) => panic!("unexpected error: {other}"),
    }
}

#[test]
fn readding_a_layer_moves_it_instead_of_duplicating() {
    let builder = ConnectorBuilder::new(Arc::new(MockEngine::new("mock")))
        .with_cache(CacheTtlConfig::default())
        .with_cooldown(Duration::from_secs(600))
        .with_cache(CacheTtlConfig::default());

    let stack = builder.to_stack();
    let names: Vec<&str> = stack.layers.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["CachingConnector", "CooldownConnector", "RawConnector"]
    );
    assert!(builder.build().is_ok());
}

#[test]
fn from_stack_rebuilds_stateless_layers() {
    let original = ConnectorBuilder::new(Arc::new(MockEngine::new("mock")))
        .with_resilience(
            RetryConfig {
                max_retries: 4,
                base_delay: Duration::from_millis(250),
                max_delay: Duration::from_secs(2),
                jitter_percent: 10,
            },
            Duration::from_secs(3),
        )
        .with_cooldown(Duration::from_secs(120))
        .with_cache(CacheTtlConfig::default());
    let exported = original.to_stack();

    let rebuilt = ConnectorBuilder::from_stack(Arc::new(MockEngine::new("mock")), &exported);
    let reexported = rebuilt.to_stack();

    assert_eq!(exported.layers.len(), reexported.layers.len());
    for (a, b) in exported.layers.iter().zip(&reexported.layers) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.config, b.config, "layer {} config drifted", a.name);
    }
}

#[test]
fn from_stack_skips_stateful_and_unknown_layers() {
    let exported = ConnectorBuilder::standard(
        Arc::new(MockEngine::new("mock")),
        CacheTtlConfig::default(),
        Duration::from_secs(600),
        Arc::new(UsageLedger::new()),
        Arc::new(HealthTracker::new(HealthConfig::default())),
        RetryConfig::default(),
        Duration::from_secs(10),
    )
    .to_stack();

    let rebuilt = ConnectorBuilder::from_stack(Arc::new(MockEngine::new("mock")), &exported);
    let stack = rebuilt.to_stack();
    let names: Vec<&str> = stack.layers.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "CachingConnector",
            "CooldownConnector",
            "ResilientConnector",
            "RawConnector",
        ]
    );
}
