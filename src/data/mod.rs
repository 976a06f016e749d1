//! Core data models for fxtiers
//!
//! This module contains the rate table returned by the rate source, the cache
//! entry persisted per base currency, and the currency registry.

pub mod currencies;
pub mod rates;
pub mod source;

pub use currencies::{CurrencyRegistry, CURRENCIES};
pub use rates::{Clock, RateCache, SystemClock};
pub use source::{HttpRateSource, RateSource};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How long a cache entry stays fresh, in milliseconds (24 hours)
pub const CACHE_TTL_MILLIS: i64 = 86_400_000;

/// A currency known to the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    /// Lowercase ISO-4217-like code
    pub code: &'static str,
    /// Human-readable name
    pub name: &'static str,
}

/// Rates from one currency to every target it lists ("1 base = rate target")
pub type Rates = BTreeMap<String, f64>;

/// Rate table as published by the rate source
///
/// The body looks like `{"date": "2023-01-01", "usd": {"eur": 0.93, ...}}`.
/// Every key other than `date` is a base currency mapped to its rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    /// Publication date, when the source includes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// base -> (target -> rate)
    #[serde(flatten)]
    pub rates: BTreeMap<String, Rates>,
}

impl RateTable {
    /// Rates listed for the given base currency
    pub fn rates_for(&self, base: &str) -> Option<&Rates> {
        self.rates.get(base)
    }
}

/// A rate table persisted under its base currency code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Epoch milliseconds after which the entry must be refreshed
    pub expiration: i64,
    /// The rate table as fetched
    pub exchanges: RateTable,
}

impl CacheEntry {
    /// Creates an entry expiring one TTL after `now_millis`
    pub fn new(exchanges: RateTable, now_millis: i64) -> Self {
        Self {
            expiration: now_millis + CACHE_TTL_MILLIS,
            exchanges,
        }
    }

    /// An entry is expired once `expiration <= now`
    pub fn is_expired(&self, now_millis: i64) -> bool {
        self.expiration <= now_millis
    }
}
