//! Error types for the fetch-cache-classify pipeline

use thiserror::Error;

/// Errors that can occur while loading and classifying exchange rates
#[derive(Debug, Error)]
pub enum RatesError {
    /// Network failure or non-success response from the rate source
    #[error("Failed to fetch exchange rates: {0}")]
    Fetch(String),

    /// Stored or fetched data is not valid JSON of the expected shape
    #[error("Failed to parse exchange rate data: {0}")]
    Parse(#[from] serde_json::Error),

    /// A registry currency is absent from the fetched rate mapping
    #[error("No rate for '{code}' in the '{base}' rate table")]
    MissingRate { base: String, code: String },

    /// Cache directory could not be read or written
    #[error("Cache storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl From<reqwest::Error> for RatesError {
    fn from(err: reqwest::Error) -> Self {
        RatesError::Fetch(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RatesError>;
