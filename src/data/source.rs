//! Exchange rate source client
//!
//! Fetches daily rate tables from the fawazahmed0 currency API served through
//! jsDelivr. One request per base currency, no authentication.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::RateTable;
use crate::error::{RatesError, Result};

/// Base URL for the currency API
pub const DEFAULT_SOURCE_URL: &str =
    "https://cdn.jsdelivr.net/gh/fawazahmed0/currency-api@1/latest/currencies";

/// How long a single request may take before it is abandoned
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Anything that can produce a fresh rate table for a base currency
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_rates(&self, base: &str) -> Result<RateTable>;
}

/// Client for fetching rate tables over HTTP
#[derive(Debug, Clone)]
pub struct HttpRateSource {
    client: Client,
    /// Base URL for the API (allows override for testing)
    base_url: String,
}

impl Default for HttpRateSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpRateSource {
    /// Create a new HttpRateSource pointing at the public API
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_SOURCE_URL)
    }

    /// Create a new HttpRateSource with a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a new HttpRateSource whose requests give up after `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// URL of the rate table for `base`
    pub fn url_for(&self, base: &str) -> String {
        format!("{}/{}.json", self.base_url.trim_end_matches('/'), base)
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn fetch_rates(&self, base: &str) -> Result<RateTable> {
        let url = self.url_for(base);
        log::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RatesError::Fetch(format!("{} returned {}", url, status)));
        }

        let text = response.text().await?;
        let table: RateTable = serde_json::from_str(&text)?;
        Ok(table)
    }
}
