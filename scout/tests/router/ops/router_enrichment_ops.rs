use std::sync::Arc;

use chrono::Utc;
use scout::{
    CrmStanding, CrmStatus, EmailOutcome, EmailVerdict, Scout, ScoutError, Signal, SignalKind,
};

use crate::helpers::{MockConnector, contact_summary, domain};

#[tokio::test]
async fn verify_email_routes_to_the_capable_engine() {
    // A discovery-only engine and a verifier; only the verifier is eligible.
    let mut search_only = MockConnector::named("search");
    search_only.discover_fn = Some(Arc::new(|_| Ok(vec![])));

    let mut verifier = MockConnector::named("verifier");
    verifier.verify_fn = Some(Arc::new(|email| {
        Ok(EmailVerdict {
            email: email.to_string(),
            outcome: EmailOutcome::Risky,
            confidence: None,
        })
    }));

    let scout = Scout::builder()
        .with_prepared_engine(Arc::new(search_only))
        .with_prepared_engine(Arc::new(verifier))
        .build()
        .unwrap();

    let verdict = scout.verify_email("pat@acme.com").await.unwrap();
    assert_eq!(verdict.outcome, EmailOutcome::Risky);
}

#[tokio::test]
async fn untracked_company_is_ok_not_an_error() {
    let mut crm = MockConnector::named("crm");
    crm.crm_fn = Some(Arc::new(|_| Ok(CrmStatus::not_tracked())));

    let scout = Scout::builder()
        .with_prepared_engine(Arc::new(crm))
        .build()
        .unwrap();

    let status = scout.crm_status(&domain("unknown.io")).await.unwrap();
    assert_eq!(status.standing, CrmStanding::NotTracked);
}

#[tokio::test]
async fn extract_signals_routes_corpus_and_domain() {
    let mut extractor = MockConnector::named("llm");
    extractor.signals_fn = Some(Arc::new(|dom, corpus| {
        assert!(corpus.contains("Series B"));
        Ok(vec![Signal {
            id: format!("{dom}:0:funding"),
            kind: SignalKind::Funding,
            title: "Raised a Series B".into(),
            summary: None,
            url: None,
            source: "llm".into(),
            observed_at: Utc::now(),
        }])
    }));

    let scout = Scout::builder()
        .with_prepared_engine(Arc::new(extractor))
        .build()
        .unwrap();

    let signals = scout
        .extract_signals(&domain("acme.com"), "Acme raised a Series B.")
        .await
        .unwrap();
    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].kind, SignalKind::Funding);
}

#[tokio::test]
async fn failing_enrichment_aggregates_errors() {
    let mut broken = MockConnector::named("broken");
    broken.contacts_fn = Some(Arc::new(|_| Err(ScoutError::Http { status: 500 })));

    let scout = Scout::builder()
        .with_prepared_engine(Arc::new(broken))
        .build()
        .unwrap();

    let res = scout.enrich_contacts(&domain("acme.com")).await;
    match res {
        Err(ScoutError::AllEnginesFailed(errors)) => {
            assert_eq!(errors.len(), 1);
            assert!(matches!(errors[0], ScoutError::Http { status: 500 }));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn contacts_summary_passes_through() {
    let mut enricher = MockConnector::named("apollo");
    enricher.contacts_fn = Some(Arc::new(|dom| Ok(contact_summary(dom.as_str(), 12))));

    let scout = Scout::builder()
        .with_prepared_engine(Arc::new(enricher))
        .build()
        .unwrap();

    let summary = scout.enrich_contacts(&domain("acme.com")).await.unwrap();
    assert_eq!(summary.total, 12);
    assert_eq!(summary.sample_emails, vec!["pat@acme.com".to_string()]);
}
