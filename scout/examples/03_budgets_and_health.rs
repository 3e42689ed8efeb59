mod common;
use common::get_engine;
use scout::{BudgetConfig, DiscoveryRequest, Scout};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let engine = get_engine();
    let name = engine.name();

    // Cap the engine at 100 calls per UTC day. Over-budget engines are
    // deprioritized in routing order, never blocked outright.
    let scout = Scout::builder()
        .with_engine(engine)
        .budget(BudgetConfig::default().with_limit(name, 100))
        .build()?;

    let req = DiscoveryRequest::new("logistics startups")?.with_limit(5);
    let report = scout.search(&req).await?;
    println!("found {} companies", report.companies.len());

    for budget in scout.budget_state() {
        println!(
            "budget: {} used {}/{} today",
            budget.engine,
            budget.used,
            budget
                .limit
                .map_or_else(|| "unlimited".to_string(), |l| l.to_string()),
        );
    }
    for health in scout.provider_health() {
        println!(
            "health: {} {:?} ({}/{} calls failed)",
            health.engine, health.state, health.failed_calls, health.total_calls,
        );
    }

    Ok(())
}
