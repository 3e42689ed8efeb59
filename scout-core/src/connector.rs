//! Provider traits and the master connector trait.
//!
//! Engines implement one provider trait per capability they serve, plus
//! [`EngineConnector`], whose `as_*_provider` accessors advertise which
//! capabilities are available. Middleware wrappers implement the same traits
//! and delegate inward; the macros at the bottom of this module generate that
//! boilerplate.

use async_trait::async_trait;

use scout_types::{
    Capability, CompanyRecord, ContactSummary, CrmStatus, DiscoveryRequest, Domain, EmailVerdict,
    NameLookupRequest, ScoutError, Signal,
};

/// Free-text company discovery.
#[async_trait]
pub trait DiscoveryProvider: Send + Sync {
    /// Run a discovery search and return candidate companies.
    async fn discover(&self, req: &DiscoveryRequest) -> Result<Vec<CompanyRecord>, ScoutError>;
}

/// Resolving a company by its exact name.
#[async_trait]
pub trait NameLookupProvider: Send + Sync {
    /// Return candidate companies matching the name, best match first.
    async fn lookup_by_name(
        &self,
        req: &NameLookupRequest,
    ) -> Result<Vec<CompanyRecord>, ScoutError>;
}

/// Counting and sampling contacts at a company.
#[async_trait]
pub trait ContactEnrichmentProvider: Send + Sync {
    /// Summarize reachable contacts at the given company domain.
    async fn enrich_contacts(&self, domain: &Domain) -> Result<ContactSummary, ScoutError>;
}

/// Verifying deliverability of a single email address.
#[async_trait]
pub trait EmailVerificationProvider: Send + Sync {
    /// Verify one email address.
    async fn verify_email(&self, email: &str) -> Result<EmailVerdict, ScoutError>;
}

/// Looking up a company's standing in the CRM.
#[async_trait]
pub trait CrmStatusProvider: Send + Sync {
    /// Fetch the CRM standing for a company domain.
    ///
    /// Companies absent from the CRM yield `Ok` with
    /// [`CrmStanding::NotTracked`](scout_types::CrmStanding::NotTracked),
    /// not an error.
    async fn crm_status(&self, domain: &Domain) -> Result<CrmStatus, ScoutError>;
}

/// Extracting buying signals from unstructured text.
#[async_trait]
pub trait SignalExtractionProvider: Send + Sync {
    /// Extract signals about `domain` from the given text corpus.
    async fn extract_signals(
        &self,
        domain: &Domain,
        corpus: &str,
    ) -> Result<Vec<Signal>, ScoutError>;
}

/// Master trait implemented by every engine adapter and middleware wrapper.
///
/// The `as_*_provider` accessors return `Some` only for capabilities the
/// engine actually serves; the router uses them both to filter candidates and
/// to dispatch calls.
#[async_trait]
pub trait EngineConnector: Send + Sync {
    /// Stable engine name, used in routing policies, budgets, and reports.
    fn name(&self) -> &'static str;

    /// Human-readable vendor name.
    fn vendor(&self) -> &'static str;

    /// Whether this engine serves the given capability.
    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Discovery => self.as_discovery_provider().is_some(),
            Capability::NameLookup => self.as_name_lookup_provider().is_some(),
            Capability::ContactEnrichment => self.as_contact_enrichment_provider().is_some(),
            Capability::EmailVerification => self.as_email_verification_provider().is_some(),
            Capability::CrmStatus => self.as_crm_status_provider().is_some(),
            Capability::SignalExtraction => self.as_signal_extraction_provider().is_some(),
            // `Capability` is non-exhaustive; a capability this trait has no
            // accessor for cannot be served.
            _ => false,
        }
    }

    /// Discovery capability, if served.
    fn as_discovery_provider(&self) -> Option<&dyn DiscoveryProvider> {
        None
    }

    /// Name lookup capability, if served.
    fn as_name_lookup_provider(&self) -> Option<&dyn NameLookupProvider> {
        None
    }

    /// Contact enrichment capability, if served.
    fn as_contact_enrichment_provider(&self) -> Option<&dyn ContactEnrichmentProvider> {
        None
    }

    /// Email verification capability, if served.
    fn as_email_verification_provider(&self) -> Option<&dyn EmailVerificationProvider> {
        None
    }

    /// CRM status capability, if served.
    fn as_crm_status_provider(&self) -> Option<&dyn CrmStatusProvider> {
        None
    }

    /// Signal extraction capability, if served.
    fn as_signal_extraction_provider(&self) -> Option<&dyn SignalExtractionProvider> {
        None
    }
}

/// Generate the `as_*_provider` accessors for a middleware wrapper.
///
/// The wrapper advertises exactly the capabilities its inner connector
/// advertises, answering with itself so its own provider impls intercept the
/// call. Expects the wrapper to implement all six provider traits and to hold
/// the inner connector in the named field.
#[macro_export]
macro_rules! scout_connector_accessors {
    ($inner:ident) => {
        fn as_discovery_provider(&self) -> Option<&dyn $crate::connector::DiscoveryProvider> {
            if self.$inner.as_discovery_provider().is_some() {
                Some(self as &dyn $crate::connector::DiscoveryProvider)
            } else {
                None
            }
        }
        fn as_name_lookup_provider(&self) -> Option<&dyn $crate::connector::NameLookupProvider> {
            if self.$inner.as_name_lookup_provider().is_some() {
                Some(self as &dyn $crate::connector::NameLookupProvider)
            } else {
                None
            }
        }
        fn as_contact_enrichment_provider(
            &self,
        ) -> Option<&dyn $crate::connector::ContactEnrichmentProvider> {
            if self.$inner.as_contact_enrichment_provider().is_some() {
                Some(self as &dyn $crate::connector::ContactEnrichmentProvider)
            } else {
                None
            }
        }
        fn as_email_verification_provider(
            &self,
        ) -> Option<&dyn $crate::connector::EmailVerificationProvider> {
            if self.$inner.as_email_verification_provider().is_some() {
                Some(self as &dyn $crate::connector::EmailVerificationProvider)
            } else {
                None
            }
        }
        fn as_crm_status_provider(&self) -> Option<&dyn $crate::connector::CrmStatusProvider> {
            if self.$inner.as_crm_status_provider().is_some() {
                Some(self as &dyn $crate::connector::CrmStatusProvider)
            } else {
                None
            }
        }
        fn as_signal_extraction_provider(
            &self,
        ) -> Option<&dyn $crate::connector::SignalExtractionProvider> {
            if self.$inner.as_signal_extraction_provider().is_some() {
                Some(self as &dyn $crate::connector::SignalExtractionProvider)
            } else {
                None
            }
        }
    };
}

/// Generate pass-through provider impls for a middleware wrapper.
///
/// Each generated method runs the wrapper's
/// [`CallHooks::pre_call`](crate::middleware::CallHooks::pre_call) first,
/// delegates to the inner connector, and maps errors through
/// [`CallHooks::map_error`](crate::middleware::CallHooks::map_error).
/// Expects the wrapper to implement `CallHooks` and to hold
/// `Arc<dyn EngineConnector>` in the named field.
#[macro_export]
macro_rules! scout_delegate_provider_impls {
    ($self_ty:ty, $inner:ident) => {
        #[async_trait::async_trait]
        impl $crate::connector::DiscoveryProvider for $self_ty {
            async fn discover(
                &self,
                req: &$crate::DiscoveryRequest,
            ) -> Result<Vec<$crate::CompanyRecord>, $crate::ScoutError> {
                let ctx = $crate::middleware::CallContext::new($crate::Capability::Discovery);
                $crate::middleware::CallHooks::pre_call(self, &ctx).await?;
                let inner = self.$inner.as_discovery_provider().ok_or_else(|| {
                    $crate::ScoutError::unsupported($crate::Capability::Discovery)
                })?;
                inner
                    .discover(req)
                    .await
                    .map_err(|e| $crate::middleware::CallHooks::map_error(self, &ctx, e))
            }
        }

        #[async_trait::async_trait]
        impl $crate::connector::NameLookupProvider for $self_ty {
            async fn lookup_by_name(
                &self,
                req: &$crate::NameLookupRequest,
            ) -> Result<Vec<$crate::CompanyRecord>, $crate::ScoutError> {
                let ctx = $crate::middleware::CallContext::new($crate::Capability::NameLookup);
                $crate::middleware::CallHooks::pre_call(self, &ctx).await?;
                let inner = self.$inner.as_name_lookup_provider().ok_or_else(|| {
                    $crate::ScoutError::unsupported($crate::Capability::NameLookup)
                })?;
                inner
                    .lookup_by_name(req)
                    .await
                    .map_err(|e| $crate::middleware::CallHooks::map_error(self, &ctx, e))
            }
        }

        #[async_trait::async_trait]
        impl $crate::connector::ContactEnrichmentProvider for $self_ty {
            async fn enrich_contacts(
                &self,
                domain: &$crate::Domain,
            ) -> Result<$crate::ContactSummary, $crate::ScoutError> {
                let ctx =
                    $crate::middleware::CallContext::new($crate::Capability::ContactEnrichment);
                $crate::middleware::CallHooks::pre_call(self, &ctx).await?;
                let inner = self.$inner.as_contact_enrichment_provider().ok_or_else(|| {
                    $crate::ScoutError::unsupported($crate::Capability::ContactEnrichment)
                })?;
                inner
                    .enrich_contacts(domain)
                    .await
                    .map_err(|e| $crate::middleware::CallHooks::map_error(self, &ctx, e))
            }
        }

        #[async_trait::async_trait]
        impl $crate::connector::EmailVerificationProvider for $self_ty {
            async fn verify_email(
                &self,
                email: &str,
            ) -> Result<$crate::EmailVerdict, $crate::ScoutError> {
                let ctx =
                    $crate::middleware::CallContext::new($crate::Capability::EmailVerification);
                $crate::middleware::CallHooks::pre_call(self, &ctx).await?;
                let inner = self.$inner.as_email_verification_provider().ok_or_else(|| {
                    $crate::ScoutError::unsupported($crate::Capability::EmailVerification)
                })?;
                inner
                    .verify_email(email)
                    .await
                    .map_err(|e| $crate::middleware::CallHooks::map_error(self, &ctx, e))
            }
        }

        #[async_trait::async_trait]
        impl $crate::connector::CrmStatusProvider for $self_ty {
            async fn crm_status(
                &self,
                domain: &$crate::Domain,
            ) -> Result<$crate::CrmStatus, $crate::ScoutError> {
                let ctx = $crate::middleware::CallContext::new($crate::Capability::CrmStatus);
                $crate::middleware::CallHooks::pre_call(self, &ctx).await?;
                let inner = self.$inner.as_crm_status_provider().ok_or_else(|| {
                    $crate::ScoutError::unsupported($crate::Capability::CrmStatus)
                })?;
                inner
                    .crm_status(domain)
                    .await
                    .map_err(|e| $crate::middleware::CallHooks::map_error(self, &ctx, e))
            }
        }

        #[async_trait::async_trait]
        impl $crate::connector::SignalExtractionProvider for $self_ty {
            async fn extract_signals(
                &self,
                domain: &$crate::Domain,
                corpus: &str,
            ) -> Result<Vec<$crate::Signal>, $crate::ScoutError> {
                let ctx =
                    $crate::middleware::CallContext::new($crate::Capability::SignalExtraction);
                $crate::middleware::CallHooks::pre_call(self, &ctx).await?;
                let inner = self.$inner.as_signal_extraction_provider().ok_or_else(|| {
                    $crate::ScoutError::unsupported($crate::Capability::SignalExtraction)
                })?;
                inner
                    .extract_signals(domain, corpus)
                    .await
                    .map_err(|e| $crate::middleware::CallHooks::map_error(self, &ctx, e))
            }
        }
    };
}
