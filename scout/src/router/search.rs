//! The discovery search pipeline.
//!
//! `search` fans a query out to the top-ranked discovery engines, merges and
//! filters the candidates, enriches each surviving company (CRM standing,
//! contact counts, extracted signals), scores it against the target
//! criteria, and returns a ranked [`SearchReport`]. Provider failures are
//! absorbed as warnings; even a search where every discovery engine fails
//! returns an empty report rather than an error.

use std::sync::Arc;

use futures::stream::{self, StreamExt};

use scout_core::dedup::{dedupe_companies_with, dedupe_signals};
use scout_core::domain::is_noise_domain;
use scout_core::scoring::score_company;
use scout_core::{
    Capability, CompanyRecord, DiscoveryRequest, ScoutError, SearchReport, Signal, SizeBucket,
};

use crate::core::{Scout, tag_err};

/// How many discovery engines a single search fans out to.
const DISCOVERY_FANOUT: usize = 2;

/// How many companies an enrichment batch covers.
const ENRICH_BATCH: usize = 5;

/// How many enrichment batches run concurrently.
const ENRICH_CONCURRENT_BATCHES: usize = 3;

impl Scout {
    /// Run a discovery search end to end.
    ///
    /// # Errors
    /// Returns [`ScoutError::NoProviderAvailable`] when no engine serves
    /// discovery, and [`ScoutError::RequestTimeout`] when the configured
    /// end-to-end deadline elapses. Provider failures never fail the
    /// search; they are reported in [`SearchReport::warnings`], and a
    /// search where every engine failed yields an empty report.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "scout::router::search", skip(self, req), fields(query = req.query()))
    )]
    pub async fn search(&self, req: &DiscoveryRequest) -> Result<SearchReport, ScoutError> {
        crate::core::with_request_deadline(
            self.cfg.request_timeout,
            Capability::Discovery,
            self.search_inner(req),
        )
        .await?
    }

    async fn search_inner(&self, req: &DiscoveryRequest) -> Result<SearchReport, ScoutError> {
        let engines = self.ordered_for(Capability::Discovery);
        if engines.is_empty() {
            return Err(ScoutError::no_provider(Capability::Discovery));
        }

        let deadline = self.provider_deadline();
        let tasks = engines.iter().take(DISCOVERY_FANOUT).map(|engine| {
            let engine = Arc::clone(engine);
            let req = req.clone();
            async move {
                let name = engine.name();
                let res = Self::provider_call_with_timeout(
                    name,
                    Capability::Discovery,
                    deadline,
                    async move {
                        let provider = engine
                            .as_discovery_provider()
                            .ok_or_else(|| ScoutError::unsupported(Capability::Discovery))?;
                        provider.discover(&req).await
                    },
                )
                .await;
                (name, res)
            }
        });

        let mut candidates: Vec<CompanyRecord> = Vec::new();
        let mut warnings: Vec<ScoutError> = Vec::new();
        // Discovery failures degrade to warnings, even when every engine
        // fails; the report then carries no companies but stays `Ok`.
        for (name, res) in futures::future::join_all(tasks).await {
            match res {
                Ok(records) => candidates.extend(records),
                Err(e @ (ScoutError::NotFound { .. } | ScoutError::Timeout { .. })) => {
                    warnings.push(e);
                }
                Err(e) => warnings.push(tag_err(name, e)),
            }
        }

        candidates.retain(|c| !is_noise_domain(&c.domain));
        if !req.exclude_domains.is_empty() {
            candidates.retain(|c| {
                !req.exclude_domains
                    .iter()
                    .any(|excluded| excluded.root() == c.domain.root())
            });
        }
        if let Some(floor) = req.min_relevance {
            candidates.retain(|c| c.relevance.is_none_or(|r| r >= floor));
        }
        // Criteria filters are lenient: a company whose field is unknown is
        // kept and left to the fit score to sort out.
        if !req.verticals.is_empty() {
            candidates.retain(|c| {
                c.vertical
                    .as_deref()
                    .is_none_or(|v| req.verticals.iter().any(|want| v.eq_ignore_ascii_case(want)))
            });
        }
        if !req.regions.is_empty() {
            candidates.retain(|c| {
                c.region
                    .as_deref()
                    .is_none_or(|r| req.regions.iter().any(|want| r.eq_ignore_ascii_case(want)))
            });
        }
        if let Some(size) = req.size {
            candidates
                .retain(|c| c.employee_count.is_none_or(|n| SizeBucket::from_employee_count(n) == size));
        }

        let merged = dedupe_companies_with(candidates, self.cfg.recency_weight);

        let mut batches: Vec<Vec<CompanyRecord>> = Vec::new();
        let mut merged = merged.into_iter().peekable();
        while merged.peek().is_some() {
            batches.push(merged.by_ref().take(ENRICH_BATCH).collect());
        }
        let enriched: Vec<Vec<(CompanyRecord, Vec<ScoutError>)>> = stream::iter(batches)
            .map(|batch| {
                futures::future::join_all(batch.into_iter().map(|company| self.enrich_company(company)))
            })
            .buffered(ENRICH_CONCURRENT_BATCHES)
            .collect()
            .await;
        let mut companies: Vec<CompanyRecord> = Vec::new();
        for (mut company, mut company_warnings) in enriched.into_iter().flatten() {
            company.fit = Some(score_company(&company, &self.cfg.weights, &self.cfg.criteria));
            companies.push(company);
            warnings.append(&mut company_warnings);
        }

        companies.sort_by(|a, b| {
            let score_a = a.fit.as_ref().map_or(0, |f| f.score);
            let score_b = b.fit.as_ref().map_or(0, |f| f.score);
            score_b
                .cmp(&score_a)
                .then_with(|| a.domain.as_str().cmp(b.domain.as_str()))
        });
        if let Some(limit) = req.limit {
            companies.truncate(limit);
        }

        let mut signals: Vec<Signal> = companies
            .iter()
            .flat_map(|c| c.signals.iter().cloned())
            .collect();
        signals.sort_by(|a, b| b.observed_at.cmp(&a.observed_at));
        let signals = dedupe_signals(signals);

        Ok(SearchReport {
            companies,
            signals,
            warnings,
        })
    }

    /// Enrich one company with CRM standing, contact counts, and extracted
    /// signals, absorbing provider failures into warnings.
    async fn enrich_company(
        &self,
        mut company: CompanyRecord,
    ) -> (CompanyRecord, Vec<ScoutError>) {
        let mut warnings: Vec<ScoutError> = Vec::new();

        if self.supports(Capability::CrmStatus) {
            match self.crm_status(&company.domain).await {
                Ok(status) => company.crm = Some(status),
                Err(e) => warnings.push(e),
            }
        }

        if self.supports(Capability::ContactEnrichment) {
            match self.enrich_contacts(&company.domain).await {
                Ok(summary) => company.contact_count = Some(summary.total),
                Err(e) => warnings.push(e),
            }
        }

        if self.supports(Capability::SignalExtraction)
            && let Some(corpus) = company.description.clone()
            && !corpus.trim().is_empty()
        {
            match self.extract_signals(&company.domain, &corpus).await {
                Ok(extracted) => {
                    for signal in extracted {
                        if !company.signals.iter().any(|s| s.id == signal.id) {
                            company.signals.push(signal);
                        }
                    }
                }
                Err(e) => warnings.push(e),
            }
        }

        (company, warnings)
    }
}
