use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use scout::{NameLookupRequest, Scout, ScoutError};

use crate::helpers::{MockConnector, company};

#[tokio::test]
async fn lookup_falls_back_past_not_found() {
    let a_calls = Arc::new(AtomicU32::new(0));

    let mut a = MockConnector::named("a");
    {
        let calls = Arc::clone(&a_calls);
        a.lookup_fn = Some(Arc::new(move |req| {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(ScoutError::not_found(format!("company '{}'", req.name())))
        }));
    }
    let mut b = MockConnector::named("b");
    b.lookup_fn = Some(Arc::new(|req| {
        let mut found = company(req.name(), "nimbuspay.io");
        found.exact_match = true;
        Ok(vec![found])
    }));

    let scout = Scout::builder()
        .with_prepared_engine(Arc::new(a))
        .with_prepared_engine(Arc::new(b))
        .build()
        .unwrap();

    let found = scout
        .lookup_company(&NameLookupRequest::new("Nimbus").unwrap())
        .await
        .unwrap();

    assert_eq!(a_calls.load(Ordering::SeqCst), 1);
    assert_eq!(found[0].domain.as_str(), "nimbuspay.io");
    assert!(found[0].exact_match);
}

#[tokio::test]
async fn all_not_found_collapses_to_not_found() {
    let not_found = |name: &'static str| {
        let mut c = MockConnector::named(name);
        c.lookup_fn = Some(Arc::new(|req| {
            Err(ScoutError::not_found(format!("company '{}'", req.name())))
        }));
        Arc::new(c)
    };

    let scout = Scout::builder()
        .with_prepared_engine(not_found("a"))
        .with_prepared_engine(not_found("b"))
        .build()
        .unwrap();

    let res = scout
        .lookup_company(&NameLookupRequest::new("Zenith").unwrap())
        .await;
    match res {
        Err(ScoutError::NotFound { what }) => assert_eq!(what, "company 'Zenith'"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn lookup_without_capable_engine_reports_no_provider() {
    // The only engine serves CRM status, not name lookup.
    let mut crm_only = MockConnector::named("crm");
    crm_only.crm_fn = Some(Arc::new(|_| Ok(scout::CrmStatus::not_tracked())));

    let scout = Scout::builder()
        .with_prepared_engine(Arc::new(crm_only))
        .build()
        .unwrap();

    let res = scout
        .lookup_company(&NameLookupRequest::new("Acme").unwrap())
        .await;
    assert!(matches!(
        res,
        Err(ScoutError::NoProviderAvailable { capability }) if capability == "name_lookup"
    ));
}
