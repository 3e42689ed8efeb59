mod common;
use common::get_engine;
use scout::{DiscoveryRequest, Scout};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Create an engine (mock when EXA_API_KEY is not set).
    let engine = get_engine();

    // 2. Build the Scout orchestrator and register the engine.
    let scout = Scout::builder().with_engine(engine).build()?;

    // 3. Run a discovery search. Scout handles routing, merging, and scoring.
    let req = DiscoveryRequest::new("payment infrastructure startups")?.with_limit(10);
    let report = scout.search(&req).await?;

    // 4. Print the ranked companies.
    for company in &report.companies {
        let fit = company.fit.as_ref().map_or(0, |f| f.score);
        println!("{fit:>3}  {}  ({})", company.name, company.domain);
    }
    if !report.warnings.is_empty() {
        println!("warnings: {:?}", report.warnings);
    }

    Ok(())
}
