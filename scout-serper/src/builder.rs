use std::time::Duration;

use scout_core::ScoutError;

use crate::{DEFAULT_BASE_URL, SerperConnector};

/// Builder for [`SerperConnector`].
#[derive(Debug, Default)]
pub struct SerperConnectorBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl SerperConnectorBuilder {
    /// Set the API key sent in the `X-API-KEY` header.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
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
    /// Returns [`ScoutError::InvalidArg`] when no API key was provided, or
    /// when the HTTP client cannot be constructed.
    pub fn build(self) -> Result<SerperConnector, ScoutError> {
        let api_key = self
            .api_key
            .ok_or_else(|| ScoutError::invalid_arg("serper: api_key is required"))?;
        let mut client = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            client = client.timeout(timeout);
        }
        let client = client
            .build()
            .map_err(|e| ScoutError::invalid_arg(format!("serper: http client: {e}")))?;
        Ok(SerperConnector {
            client,
            api_key,
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }
}
