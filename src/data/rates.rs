//! Exchange rate cache
//!
//! Serves rate tables from the on-disk store while they are fresh and refetches
//! them from the rate source once they expire. Whatever is returned is read back
//! from the store after any write, so the caller always sees exactly what is
//! persisted.

use chrono::Utc;
use std::io;
use std::sync::Arc;

use super::{CacheEntry, RateSource, RateTable};
use crate::cache::CacheManager;
use crate::error::{RatesError, Result};

/// Source of the current time in epoch milliseconds
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Rate tables keyed by base currency with a 24 hour expiry
#[derive(Clone)]
pub struct RateCache {
    store: CacheManager,
    source: Arc<dyn RateSource>,
    clock: Arc<dyn Clock>,
}

impl RateCache {
    /// Creates a cache backed by `store` that fetches from `source`
    pub fn new(store: CacheManager, source: Arc<dyn RateSource>) -> Self {
        Self::with_clock(store, source, Arc::new(SystemClock))
    }

    /// Creates a cache with an explicit clock
    pub fn with_clock(
        store: CacheManager,
        source: Arc<dyn RateSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            source,
            clock,
        }
    }

    /// Returns the rate table for `base`, fetching it if missing or expired
    ///
    /// # Returns
    /// * `Ok(RateTable)` - the table as currently stored
    /// * `Err(RatesError::Fetch)` - the source failed or answered with an error status
    /// * `Err(RatesError::Parse)` - stored or fetched data is malformed
    /// * `Err(RatesError::Storage)` - the store could not be read or written
    pub async fn get_rates(&self, base: &str) -> Result<RateTable> {
        let key = base.to_lowercase();

        match self.store.read(&key)? {
            None => {
                log::info!("No cached rates for {}, fetching", key);
                self.refresh(&key).await?;
            }
            Some(raw) => {
                let entry: CacheEntry = serde_json::from_str(&raw)?;
                if entry.is_expired(self.clock.now_millis()) {
                    log::warn!("Cached rates for {} expired, refetching", key);
                    self.refresh(&key).await?;
                } else {
                    log::debug!("Using cached rates for {}", key);
                }
            }
        }

        self.read_stored(&key)
    }

    /// Fetches a fresh table and overwrites the stored entry
    async fn refresh(&self, key: &str) -> Result<()> {
        let now = self.clock.now_millis();
        let exchanges = self.source.fetch_rates(key).await?;
        let entry = CacheEntry::new(exchanges, now);
        self.store.write(key, &serde_json::to_string(&entry)?)?;
        Ok(())
    }

    /// Reads back the persisted entry for `key`
    fn read_stored(&self, key: &str) -> Result<RateTable> {
        let raw = self.store.read(key)?.ok_or_else(|| {
            RatesError::Storage(io::Error::new(
                io::ErrorKind::NotFound,
                format!("cache entry for {} vanished after write", key),
            ))
        })?;
        let entry: CacheEntry = serde_json::from_str(&raw)?;
        Ok(entry.exchanges)
    }
}
