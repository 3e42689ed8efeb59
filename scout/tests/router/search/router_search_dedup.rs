use std::sync::Arc;

use chrono::Utc;
use scout::{DiscoveryRequest, Scout, Signal, SignalKind};

use crate::helpers::{MockConnector, company};

fn signal(id: &str, kind: SignalKind, hours_ago: i64) -> Signal {
    Signal {
        id: id.to_string(),
        kind,
        title: id.to_string(),
        summary: None,
        url: None,
        source: "mock".to_string(),
        observed_at: Utc::now() - chrono::Duration::hours(hours_ago),
    }
}

#[tokio::test]
async fn merged_record_backfills_gaps_from_older_duplicates() {
    let alpha = discovery_engine("alpha", || {
        let mut acme = company("Acme", "acme.com");
        acme.sources = vec!["alpha".into()];
        acme.vertical = Some("fintech".into());
        acme.employee_count = Some(80);
        acme.relevance = Some(0.4);
        acme.last_refreshed = Utc::now() - chrono::Duration::hours(2);
        Ok(vec![acme])
    });
    let beta = discovery_engine("beta", || {
        let mut acme = company("Acme Corp", "acme.com");
        acme.sources = vec!["beta".into()];
        acme.description = Some("Payments infrastructure.".into());
        acme.relevance = Some(0.9);
        Ok(vec![acme])
    });

    let scout = Scout::builder()
        .with_prepared_engine(alpha)
        .with_prepared_engine(beta)
        .build()
        .unwrap();

    let req = DiscoveryRequest::new("payments").unwrap();
    let report = scout.search(&req).await.unwrap();

    assert_eq!(report.companies.len(), 1);
    let acme = &report.companies[0];
    // Newest record is the base; older members backfill its gaps.
    assert_eq!(acme.name, "Acme Corp");
    assert_eq!(acme.vertical.as_deref(), Some("fintech"));
    assert_eq!(acme.employee_count, Some(80));
    assert_eq!(acme.description.as_deref(), Some("Payments infrastructure."));
    // Relevance keeps the best value seen across providers.
    assert_eq!(acme.relevance, Some(0.9));
    assert_eq!(acme.sources, vec!["beta".to_string(), "alpha".to_string()]);
}

#[tokio::test]
async fn signal_feed_is_deduplicated_and_newest_first() {
    let alpha = discovery_engine("alpha", || {
        let mut acme = company("Acme", "acme.com");
        acme.signals = vec![
            signal("acme.com:funding", SignalKind::Funding, 5),
            signal("acme.com:hiring", SignalKind::Hiring, 1),
        ];
        let mut nimbus = company("Nimbus", "nimbuspay.io");
        nimbus.signals = vec![signal("nimbuspay.io:launch", SignalKind::ProductLaunch, 3)];
        Ok(vec![acme, nimbus])
    });
    let beta = discovery_engine("beta", || {
        let mut acme = company("Acme", "acme.com");
        acme.last_refreshed = Utc::now() - chrono::Duration::hours(1);
        // Same funding signal observed by a second provider.
        acme.signals = vec![signal("acme.com:funding", SignalKind::Funding, 5)];
        Ok(vec![acme])
    });

    let scout = Scout::builder()
        .with_prepared_engine(alpha)
        .with_prepared_engine(beta)
        .build()
        .unwrap();

    let req = DiscoveryRequest::new("payments").unwrap();
    let report = scout.search(&req).await.unwrap();

    let ids: Vec<&str> = report.signals.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["acme.com:hiring", "nimbuspay.io:launch", "acme.com:funding"]
    );
}

fn discovery_engine(
    name: &'static str,
    results: impl Fn() -> Result<Vec<scout::CompanyRecord>, scout::ScoutError> + Send + Sync + 'static,
) -> Arc<MockConnector> {
    let mut c = MockConnector::named(name);
    c.discover_fn = Some(Arc::new(move |_req| results()));
    Arc::new(c)
}
