use std::time::Duration;

use scout_core::ScoutError;

use crate::{DEFAULT_BASE_URL, HubspotConnector};

/// Builder for [`HubspotConnector`].
#[derive(Debug, Default)]
pub struct HubspotConnectorBuilder {
    access_token: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl HubspotConnectorBuilder {
    /// Set the private-app access token sent as a bearer token.
    #[must_use]
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Override the API base URL. Mainly useful for tests.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the HTTP client timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the connector.
    ///
    /// # Errors
    /// Returns [`ScoutError::InvalidArg`] when no access token was provided,
    /// or when the HTTP client cannot be constructed.
    pub fn build(self) -> Result<HubspotConnector, ScoutError> {
        let access_token = self
            .access_token
            .ok_or_else(|| ScoutError::invalid_arg("hubspot: access_token is required"))?;
        let mut client = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            client = client.timeout(timeout);
        }
        let client = client
            .build()
            .map_err(|e| ScoutError::invalid_arg(format!("hubspot: http client: {e}")))?;
        Ok(HubspotConnector {
            client,
            access_token,
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }
}
