use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use scout::{BudgetConfig, EmailOutcome, EmailVerdict, Scout};

use crate::helpers::MockConnector;

fn counted_verifier(name: &'static str, calls: &Arc<AtomicU32>) -> Arc<MockConnector> {
    let mut c = MockConnector::named(name);
    let calls = Arc::clone(calls);
    c.verify_fn = Some(Arc::new(move |email| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(EmailVerdict {
            email: email.to_string(),
            outcome: EmailOutcome::Deliverable,
            confidence: Some(0.9),
        })
    }));
    Arc::new(c)
}

#[tokio::test]
async fn over_budget_engine_is_deprioritized_not_blocked() {
    let a_calls = Arc::new(AtomicU32::new(0));
    let b_calls = Arc::new(AtomicU32::new(0));

    let scout = Scout::builder()
        .with_engine(counted_verifier("a", &a_calls))
        .with_engine(counted_verifier("b", &b_calls))
        .budget(BudgetConfig::default().with_limit("a", 1))
        .build()
        .unwrap();

    // Distinct addresses so the cache never short-circuits the router.
    scout.verify_email("one@acme.com").await.unwrap();
    assert_eq!(a_calls.load(Ordering::SeqCst), 1);

    scout.verify_email("two@acme.com").await.unwrap();
    assert_eq!(a_calls.load(Ordering::SeqCst), 1);
    assert_eq!(b_calls.load(Ordering::SeqCst), 1);

    let budgets = scout.budget_state();
    let a_budget = budgets.iter().find(|b| b.engine == "a").unwrap();
    assert_eq!(a_budget.used, 1);
    assert_eq!(a_budget.limit, Some(1));
    assert_eq!(a_budget.remaining, Some(0));
    let b_budget = budgets.iter().find(|b| b.engine == "b").unwrap();
    assert_eq!(b_budget.limit, None);
}

#[tokio::test]
async fn cache_hits_are_never_charged() {
    let calls = Arc::new(AtomicU32::new(0));

    let scout = Scout::builder()
        .with_engine(counted_verifier("a", &calls))
        .build()
        .unwrap();

    let first = scout.verify_email("pat@acme.com").await.unwrap();
    let second = scout.verify_email("pat@acme.com").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(scout.budget_state()[0].used, 1);
}
