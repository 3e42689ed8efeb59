mod common;
use common::get_engine;
use scout::{DiscoveryRequest, NameLookupRequest, Scout};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,scout=trace (build with --features scout/tracing)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let scout = Scout::builder().with_engine(get_engine()).build()?;

    // Discovery search
    let req = DiscoveryRequest::new("developer tools startups")?.with_limit(5);
    let _ = scout.search(&req).await?;

    // Name lookup
    let req = NameLookupRequest::new("Acme")?;
    let _ = scout.lookup_company(&req).await?;

    Ok(())
}
