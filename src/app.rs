//! Application state management for fxtiers
//!
//! This module contains the main application state: the selected base currency,
//! the last successfully classified tables, the loading flag and the status
//! message. All pipeline errors are caught here.

use crossterm::event::{KeyCode, KeyEvent};
use std::io;
use std::sync::Arc;

use crate::cache::CacheManager;
use crate::classify::{classify_table, Classification};
use crate::cli::StartupConfig;
use crate::data::{Currency, CurrencyRegistry, HttpRateSource, RateCache};
use crate::error::{RatesError, Result};

/// User-facing message shown when a load fails
pub const FAILURE_MESSAGE: &str = "Something went wrong!";

/// Tables produced by one successful load
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedRates {
    /// Base currency the tables were computed for
    pub base: String,
    /// Publication date of the underlying rate table
    pub date: Option<String>,
    pub classification: Classification,
}

/// Fetches (or reads cached) rates for `base` and classifies them
pub async fn load_rates(
    cache: &RateCache,
    base: &str,
    registry: &CurrencyRegistry,
) -> Result<LoadedRates> {
    let table = cache.get_rates(base).await?;
    let classification = classify_table(&table, base, registry)?;
    Ok(LoadedRates {
        base: base.to_lowercase(),
        date: table.date,
        classification,
    })
}

/// Builds the rate cache described by the startup configuration
///
/// Returns `None` when no cache directory was given and none can be determined.
pub fn build_rate_cache(config: &StartupConfig) -> Option<RateCache> {
    let store = match &config.cache_dir {
        Some(dir) => CacheManager::with_dir(dir.clone()),
        None => CacheManager::new()?,
    };
    let source = HttpRateSource::with_base_url(config.source_url.clone());
    Some(RateCache::new(store, Arc::new(source)))
}

/// Main application struct managing state and data
pub struct App {
    /// Currencies available for selection and classification
    pub registry: CurrencyRegistry,
    /// Index of the selected base currency in the registry
    pub selected_index: usize,
    /// Tables from the last successful load
    pub loaded: Option<LoadedRates>,
    /// True while a load is in flight
    pub loading: bool,
    /// Message from the last failed load
    pub status: Option<String>,
    /// Flag indicating a (re)load has been requested
    pub reload_requested: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    rate_cache: Option<RateCache>,
}

impl App {
    /// Creates a new App from the startup configuration
    pub fn new(config: &StartupConfig, registry: CurrencyRegistry) -> Self {
        let cache = build_rate_cache(config);
        Self::with_cache(cache, registry, &config.base)
    }

    /// Creates a new App with an explicit rate cache
    pub fn with_cache(cache: Option<RateCache>, registry: CurrencyRegistry, base: &str) -> Self {
        let selected_index = registry.position(base).unwrap_or(0);
        Self {
            registry,
            selected_index,
            loaded: None,
            loading: false,
            status: None,
            reload_requested: true,
            show_help: false,
            should_quit: false,
            rate_cache: cache,
        }
    }

    /// Returns the currently selected base currency
    pub fn selected_currency(&self) -> Option<&Currency> {
        self.registry.all().get(self.selected_index)
    }

    /// Code of the selected base currency
    pub fn selected_code(&self) -> &str {
        self.selected_currency().map(|c| c.code).unwrap_or("usd")
    }

    /// Marks a load as started so the loading indicator can be drawn
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.reload_requested = false;
    }

    /// Loads and classifies rates for the selected currency
    ///
    /// On success the tables are replaced. On failure the error is logged, a
    /// generic message is shown and the previous tables stay as they were.
    /// The loading flag is cleared either way.
    pub async fn load(&mut self) {
        self.begin_load();
        let base = self.selected_code().to_string();

        match self.try_load(&base).await {
            Ok(loaded) => {
                self.loaded = Some(loaded);
                self.status = None;
            }
            Err(e) => {
                log::error!("Loading rates for {} failed: {}", base, e);
                self.status = Some(FAILURE_MESSAGE.to_string());
            }
        }

        self.loading = false;
    }

    async fn try_load(&self, base: &str) -> Result<LoadedRates> {
        let cache = self.rate_cache.as_ref().ok_or_else(|| {
            RatesError::Storage(io::Error::new(
                io::ErrorKind::NotFound,
                "no cache directory available",
            ))
        })?;
        load_rates(cache, base, &self.registry).await
    }

    /// Handles keyboard input
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') => self.show_help = false,
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.select_previous();
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.select_next();
            }
            KeyCode::Char('r') => {
                self.reload_requested = true;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            _ => {}
        }
    }

    fn select_previous(&mut self) {
        let len = self.registry.len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + len - 1) % len;
        self.reload_requested = true;
    }

    fn select_next(&mut self) {
        let len = self.registry.len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
        self.reload_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{RateSource, RateTable, Rates};
    use async_trait::async_trait;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tempfile::TempDir;

    /// Source returning the same forward rate for every target; can be switched off
    struct StubSource {
        rate: f64,
        fail: AtomicBool,
    }

    #[async_trait]
    impl RateSource for StubSource {
        async fn fetch_rates(&self, base: &str) -> Result<RateTable> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(RatesError::Fetch("offline".to_string()));
            }
            let rates: Rates = CurrencyRegistry::default()
                .codes()
                .filter(|c| *c != base)
                .map(|c| (c.to_string(), self.rate))
                .collect();
            let mut table = BTreeMap::new();
            table.insert(base.to_string(), rates);
            Ok(RateTable {
                date: Some("2023-05-01".to_string()),
                rates: table,
            })
        }
    }

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn create_test_app(rate: f64) -> (App, Arc<StubSource>, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = Arc::new(StubSource {
            rate,
            fail: AtomicBool::new(false),
        });
        let cache = RateCache::new(
            CacheManager::with_dir(temp_dir.path().to_path_buf()),
            source.clone(),
        );
        let app = App::with_cache(Some(cache), CurrencyRegistry::default(), "usd");
        (app, source, temp_dir)
    }

    #[test]
    fn test_new_app_requests_initial_load() {
        let (app, _source, _temp_dir) = create_test_app(1.2);
        assert!(app.reload_requested);
        assert!(!app.loading);
        assert!(app.loaded.is_none());
        assert_eq!(app.selected_code(), "usd");
    }

    #[test]
    fn test_with_cache_selects_given_base() {
        let app = App::with_cache(None, CurrencyRegistry::default(), "chf");
        assert_eq!(app.selected_code(), "chf");
    }

    #[tokio::test]
    async fn test_load_populates_tables() {
        let (mut app, _source, _temp_dir) = create_test_app(1.2);

        app.load().await;

        assert!(!app.loading);
        assert!(app.status.is_none());
        let loaded = app.loaded.as_ref().expect("Tables should be loaded");
        assert_eq!(loaded.base, "usd");
        assert_eq!(loaded.date.as_deref(), Some("2023-05-01"));
        assert_eq!(loaded.classification.group2.len(), 6);
        assert_eq!(loaded.classification.group1.len(), 6);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_tables() {
        let (mut app, source, _temp_dir) = create_test_app(1.2);
        app.load().await;
        let before = app.loaded.clone();

        source.fail.store(true, Ordering::SeqCst);
        app.handle_key(key_event(KeyCode::Right));
        app.load().await;

        assert!(!app.loading, "Loading indicator must be cleared on failure");
        assert_eq!(app.status.as_deref(), Some(FAILURE_MESSAGE));
        assert_eq!(app.loaded, before);
        assert_eq!(app.selected_code(), "eur");
    }

    #[tokio::test]
    async fn test_missing_cache_dir_reports_failure() {
        let mut app = App::with_cache(None, CurrencyRegistry::default(), "usd");

        app.load().await;

        assert!(!app.loading);
        assert_eq!(app.status.as_deref(), Some(FAILURE_MESSAGE));
        assert!(app.loaded.is_none());
    }

    #[tokio::test]
    async fn test_successful_load_clears_status() {
        let (mut app, _source, _temp_dir) = create_test_app(0.8);
        app.status = Some(FAILURE_MESSAGE.to_string());

        app.load().await;

        assert!(app.status.is_none());
    }

    #[test]
    fn test_right_and_left_cycle_currencies() {
        let (mut app, _source, _temp_dir) = create_test_app(1.2);
        app.reload_requested = false;

        app.handle_key(key_event(KeyCode::Left));
        assert_eq!(app.selected_code(), "bgn");
        assert!(app.reload_requested);

        app.handle_key(key_event(KeyCode::Char('l')));
        assert_eq!(app.selected_code(), "usd");
        app.handle_key(key_event(KeyCode::Char('l')));
        assert_eq!(app.selected_code(), "eur");
    }

    #[test]
    fn test_r_requests_reload() {
        let (mut app, _source, _temp_dir) = create_test_app(1.2);
        app.begin_load();
        assert!(!app.reload_requested);

        app.handle_key(key_event(KeyCode::Char('r')));
        assert!(app.reload_requested);
    }

    #[test]
    fn test_help_toggle_and_quit() {
        let (mut app, _source, _temp_dir) = create_test_app(1.2);

        app.handle_key(key_event(KeyCode::Char('?')));
        assert!(app.show_help);
        app.handle_key(key_event(KeyCode::Esc));
        assert!(!app.show_help);
        assert!(!app.should_quit);

        app.handle_key(key_event(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_keys_ignored_while_help_open() {
        let (mut app, _source, _temp_dir) = create_test_app(1.2);
        app.show_help = true;

        app.handle_key(key_event(KeyCode::Right));

        assert_eq!(app.selected_code(), "usd");
    }
}
