use std::sync::Arc;

use chrono::Utc;
use scout::{
    CrmStanding, CrmStatus, DiscoveryRequest, Scout, ScoutError, Signal, SignalKind,
    TargetCriteria,
};

use crate::helpers::{MockConnector, company, domain};

fn discovery(
    name: &'static str,
    results: impl Fn() -> Result<Vec<scout::CompanyRecord>, ScoutError> + Send + Sync + 'static,
) -> Arc<MockConnector> {
    let mut c = MockConnector::named(name);
    c.discover_fn = Some(Arc::new(move |_req| results()));
    Arc::new(c)
}

#[tokio::test]
async fn search_merges_filters_enriches_and_scores() {
    let alpha = discovery("alpha", || {
        let mut acme = company("Acme", "acme.com");
        acme.sources = vec!["alpha".into()];
        acme.relevance = Some(0.9);
        acme.last_refreshed = Utc::now() - chrono::Duration::hours(1);
        Ok(vec![
            acme,
            company("LinkedIn", "linkedin.com"),
            company("Rival", "rival.com"),
        ])
    });
    let beta = discovery("beta", || {
        let mut acme = company("Acme Corp", "acme.com");
        acme.sources = vec!["beta".into()];
        acme.description = Some("Acme is hiring across go-to-market.".into());
        Ok(vec![acme])
    });

    let mut crm = MockConnector::named("crm");
    crm.crm_fn = Some(Arc::new(|_| Ok(CrmStatus::not_tracked())));
    let mut contacts = MockConnector::named("contacts");
    contacts.contacts_fn = Some(Arc::new(|dom| Ok(crate::helpers::contact_summary(dom.as_str(), 7))));
    let mut extractor = MockConnector::named("llm");
    extractor.signals_fn = Some(Arc::new(|dom, _corpus| {
        Ok(vec![Signal {
            id: format!("{dom}:0:hiring"),
            kind: SignalKind::Hiring,
            title: "Hiring across go-to-market".into(),
            summary: None,
            url: None,
            source: "llm".into(),
            observed_at: Utc::now(),
        }])
    }));

    let scout = Scout::builder()
        .with_prepared_engine(alpha)
        .with_prepared_engine(beta)
        .with_prepared_engine(Arc::new(crm))
        .with_prepared_engine(Arc::new(contacts))
        .with_prepared_engine(Arc::new(extractor))
        .build()
        .unwrap();

    let req = DiscoveryRequest::new("payments infrastructure")
        .unwrap()
        .exclude(domain("rival.com"))
        .with_limit(10);
    let report = scout.search(&req).await.unwrap();

    assert!(report.warnings.is_empty());
    // Noise and excluded domains are gone; acme survives once.
    assert_eq!(report.companies.len(), 1);
    let acme = &report.companies[0];
    assert_eq!(acme.domain.as_str(), "acme.com");
    // Both discovery engines contributed to the merged record.
    assert!(acme.sources.contains(&"beta".to_string()));
    assert!(acme.sources.contains(&"alpha".to_string()));
    // The newer record won, the older one backfilled nothing it had.
    assert_eq!(acme.name, "Acme Corp");
    assert_eq!(acme.relevance, Some(0.9));
    // Enrichment ran.
    assert_eq!(acme.contact_count, Some(7));
    assert_eq!(
        acme.crm.as_ref().map(|c| c.standing),
        Some(CrmStanding::NotTracked)
    );
    assert_eq!(acme.signals.len(), 1);
    assert!(acme.fit.is_some());
    // The signal feed mirrors the companies' signals.
    assert_eq!(report.signals.len(), 1);
    assert_eq!(report.signals[0].kind, SignalKind::Hiring);
}

#[tokio::test]
async fn ranking_follows_fit_score() {
    let engine = discovery("alpha", || {
        let mut fintech = company("Nimbus", "nimbuspay.io");
        fintech.vertical = Some("fintech".into());
        let mut logistics = company("Boxly", "boxly.com");
        logistics.vertical = Some("logistics".into());
        // Worse-fitting company first, to prove sorting reorders.
        Ok(vec![logistics, fintech])
    });

    let scout = Scout::builder()
        .with_prepared_engine(engine)
        .criteria(TargetCriteria {
            verticals: vec!["fintech".into()],
            ..TargetCriteria::default()
        })
        .build()
        .unwrap();

    let req = DiscoveryRequest::new("payments").unwrap();
    let report = scout.search(&req).await.unwrap();

    assert_eq!(report.companies.len(), 2);
    assert_eq!(report.companies[0].domain.as_str(), "nimbuspay.io");
    let first = report.companies[0].fit.as_ref().unwrap().score;
    let second = report.companies[1].fit.as_ref().unwrap().score;
    assert!(first > second);
}

#[tokio::test]
async fn limit_caps_the_report() {
    let engine = discovery("alpha", || {
        Ok(vec![
            company("A", "a-company.com"),
            company("B", "b-company.com"),
            company("C", "c-company.com"),
        ])
    });

    let scout = Scout::builder().with_prepared_engine(engine).build().unwrap();

    let req = DiscoveryRequest::new("startups").unwrap().with_limit(2);
    let report = scout.search(&req).await.unwrap();
    assert_eq!(report.companies.len(), 2);
}

#[tokio::test]
async fn partial_discovery_failure_becomes_a_warning() {
    let healthy = discovery("alpha", || Ok(vec![company("Acme", "acme.com")]));
    let broken = discovery("beta", || Err(ScoutError::Http { status: 500 }));

    let scout = Scout::builder()
        .with_prepared_engine(healthy)
        .with_prepared_engine(broken)
        .build()
        .unwrap();

    let req = DiscoveryRequest::new("payments").unwrap();
    let report = scout.search(&req).await.unwrap();

    assert_eq!(report.companies.len(), 1);
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(report.warnings[0], ScoutError::Http { status: 500 }));
}

#[tokio::test]
async fn total_discovery_failure_degrades_to_an_empty_report() {
    let broken_a = discovery("alpha", || Err(ScoutError::Http { status: 500 }));
    let broken_b = discovery("beta", || Err(ScoutError::Network("reset".into())));

    let scout = Scout::builder()
        .with_prepared_engine(broken_a)
        .with_prepared_engine(broken_b)
        .build()
        .unwrap();

    let req = DiscoveryRequest::new("payments").unwrap();
    let report = scout.search(&req).await.unwrap();
    assert!(report.companies.is_empty());
    assert!(report.signals.is_empty());
    assert_eq!(report.warnings.len(), 2);
}

#[tokio::test]
async fn search_without_discovery_engines_reports_no_provider() {
    let mut crm_only = MockConnector::named("crm");
    crm_only.crm_fn = Some(Arc::new(|_| Ok(CrmStatus::not_tracked())));

    let scout = Scout::builder()
        .with_prepared_engine(Arc::new(crm_only))
        .build()
        .unwrap();

    let req = DiscoveryRequest::new("payments").unwrap();
    let res = scout.search(&req).await;
    assert!(matches!(
        res,
        Err(ScoutError::NoProviderAvailable { capability }) if capability == "discovery"
    ));
}

#[tokio::test]
async fn enrichment_failure_is_absorbed_as_a_warning() {
    let engine = discovery("alpha", || Ok(vec![company("Acme", "acme.com")]));
    let mut crm = MockConnector::named("crm");
    crm.crm_fn = Some(Arc::new(|_| Err(ScoutError::Http { status: 503 })));

    let scout = Scout::builder()
        .with_prepared_engine(engine)
        .with_prepared_engine(Arc::new(crm))
        .build()
        .unwrap();

    let req = DiscoveryRequest::new("payments").unwrap();
    let report = scout.search(&req).await.unwrap();

    assert_eq!(report.companies.len(), 1);
    assert!(report.companies[0].crm.is_none());
    assert_eq!(report.warnings.len(), 1);
}
