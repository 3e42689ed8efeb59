mod common;
use common::get_engine;
use scout::{NameLookupRequest, Scout};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let scout = Scout::builder().with_engine(get_engine()).build()?;

    // Resolve a company by name, then enrich what we found.
    let req = NameLookupRequest::new("Acme")?;
    let companies = scout.lookup_company(&req).await?;
    let Some(company) = companies.first() else {
        println!("no match for 'Acme'");
        return Ok(());
    };
    println!("resolved: {} -> {}", company.name, company.domain);

    match scout.enrich_contacts(&company.domain).await {
        Ok(summary) => println!(
            "contacts: {} total, sample titles: {:?}",
            summary.total, summary.titles
        ),
        Err(e) => println!("contact enrichment unavailable: {e}"),
    }

    match scout.crm_status(&company.domain).await {
        Ok(status) => println!("crm standing: {:?}", status.standing),
        Err(e) => println!("crm status unavailable: {e}"),
    }

    Ok(())
}
