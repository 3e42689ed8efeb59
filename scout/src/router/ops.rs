//! Single-result routed operations.
//!
//! Every operation here walks the eligible engines in routing order and
//! returns the first success; see `Scout::fetch_single` for the fallback and
//! error-collapse rules.

use scout_core::{
    Capability, CompanyRecord, ContactSummary, CrmStatus, Domain, EmailVerdict,
    NameLookupRequest, ScoutError, Signal,
};

use crate::core::Scout;

impl Scout {
    /// Resolve a company by name, best match first.
    ///
    /// # Errors
    /// Returns [`ScoutError::NotFound`] when every eligible engine reports no
    /// match, [`ScoutError::NoProviderAvailable`] when no engine serves name
    /// lookup, and an aggregate error when all eligible engines fail.
    pub async fn lookup_company(
        &self,
        req: &NameLookupRequest,
    ) -> Result<Vec<CompanyRecord>, ScoutError> {
        self.fetch_single(
            Capability::NameLookup,
            Some(format!("company '{}'", req.name())),
            |engine| {
                let req = req.clone();
                async move {
                    let provider = engine
                        .as_name_lookup_provider()
                        .ok_or_else(|| ScoutError::unsupported(Capability::NameLookup))?;
                    provider.lookup_by_name(&req).await
                }
            },
        )
        .await
    }

    /// Summarize reachable contacts at a company domain.
    ///
    /// # Errors
    /// Returns [`ScoutError::NoProviderAvailable`] when no engine serves
    /// contact enrichment, and an aggregate error when all eligible engines
    /// fail.
    pub async fn enrich_contacts(&self, domain: &Domain) -> Result<ContactSummary, ScoutError> {
        self.fetch_single(
            Capability::ContactEnrichment,
            Some(format!("contacts for {domain}")),
            |engine| {
                let domain = domain.clone();
                async move {
                    let provider = engine
                        .as_contact_enrichment_provider()
                        .ok_or_else(|| ScoutError::unsupported(Capability::ContactEnrichment))?;
                    provider.enrich_contacts(&domain).await
                }
            },
        )
        .await
    }

    /// Verify deliverability of a single email address.
    ///
    /// # Errors
    /// Returns [`ScoutError::NoProviderAvailable`] when no engine serves
    /// email verification, and an aggregate error when all eligible engines
    /// fail.
    pub async fn verify_email(&self, email: &str) -> Result<EmailVerdict, ScoutError> {
        self.fetch_single(Capability::EmailVerification, None, |engine| {
            let email = email.to_string();
            async move {
                let provider = engine
                    .as_email_verification_provider()
                    .ok_or_else(|| ScoutError::unsupported(Capability::EmailVerification))?;
                provider.verify_email(&email).await
            }
        })
        .await
    }

    /// Fetch a company's CRM standing.
    ///
    /// Companies absent from the CRM yield `Ok` with
    /// [`CrmStanding::NotTracked`](scout_core::CrmStanding::NotTracked), not
    /// an error.
    ///
    /// # Errors
    /// Returns [`ScoutError::NoProviderAvailable`] when no engine serves CRM
    /// status, and an aggregate error when all eligible engines fail.
    pub async fn crm_status(&self, domain: &Domain) -> Result<CrmStatus, ScoutError> {
        self.fetch_single(Capability::CrmStatus, None, |engine| {
            let domain = domain.clone();
            async move {
                let provider = engine
                    .as_crm_status_provider()
                    .ok_or_else(|| ScoutError::unsupported(Capability::CrmStatus))?;
                provider.crm_status(&domain).await
            }
        })
        .await
    }

    /// Extract buying signals about `domain` from a text corpus.
    ///
    /// # Errors
    /// Returns [`ScoutError::NoProviderAvailable`] when no engine serves
    /// signal extraction, and an aggregate error when all eligible engines
    /// fail.
    pub async fn extract_signals(
        &self,
        domain: &Domain,
        corpus: &str,
    ) -> Result<Vec<Signal>, ScoutError> {
        self.fetch_single(Capability::SignalExtraction, None, |engine| {
            let domain = domain.clone();
            let corpus = corpus.to_string();
            async move {
                let provider = engine
                    .as_signal_extraction_provider()
                    .ok_or_else(|| ScoutError::unsupported(Capability::SignalExtraction))?;
                provider.extract_signals(&domain, &corpus).await
            }
        })
        .await
    }
}
