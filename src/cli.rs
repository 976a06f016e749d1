//! Command-line interface parsing for fxtiers
//!
//! This module handles parsing of CLI arguments using clap and turns them into a
//! validated `StartupConfig`.

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

use crate::data::source::DEFAULT_SOURCE_URL;
use crate::data::CurrencyRegistry;

/// Default base currency at startup
pub const DEFAULT_BASE: &str = "usd";

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified currency is not in the registry
    #[error("Unknown currency: '{0}'. Valid currencies: {1}")]
    UnknownCurrency(String, String),
}

/// fxtiers - View exchange rates grouped into tiers
#[derive(Parser, Debug)]
#[command(name = "fxtiers")]
#[command(about = "Currency exchange rates grouped into tiers, cached for 24 hours")]
#[command(version)]
pub struct Cli {
    /// Base currency code
    ///
    /// Valid currencies: usd, eur, aud, cad, chf, nzd, bgn
    #[arg(long, short, value_name = "CODE", default_value = DEFAULT_BASE)]
    pub base: String,

    /// Print the tables to stdout and exit instead of opening the TUI
    #[arg(long)]
    pub print: bool,

    /// Directory for cached rate tables (defaults to the XDG cache directory)
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// Base URL of the rate source
    #[arg(long, value_name = "URL", default_value = DEFAULT_SOURCE_URL)]
    pub source_url: String,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Initially selected base currency (lowercase)
    pub base: String,
    /// Non-interactive mode
    pub print: bool,
    /// Cache directory override
    pub cache_dir: Option<PathBuf>,
    /// Rate source base URL
    pub source_url: String,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE.to_string(),
            print: false,
            cache_dir: None,
            source_url: DEFAULT_SOURCE_URL.to_string(),
        }
    }
}

/// Parses a currency argument against the registry
///
/// # Returns
/// * `Ok(code)` - the lowercase registry code
/// * `Err(CliError::UnknownCurrency)` if the code is not in the registry
pub fn parse_currency_arg(s: &str, registry: &CurrencyRegistry) -> Result<String, CliError> {
    registry
        .get(s.trim())
        .map(|c| c.code.to_string())
        .ok_or_else(|| {
            let valid: Vec<_> = registry.codes().collect();
            CliError::UnknownCurrency(s.to_string(), valid.join(", "))
        })
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    pub fn from_cli(cli: &Cli, registry: &CurrencyRegistry) -> Result<Self, CliError> {
        Ok(StartupConfig {
            base: parse_currency_arg(&cli.base, registry)?,
            print: cli.print,
            cache_dir: cli.cache_dir.clone(),
            source_url: cli.source_url.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_currency_arg_accepts_any_case() {
        let registry = CurrencyRegistry::default();
        assert_eq!(parse_currency_arg("eur", &registry).unwrap(), "eur");
        assert_eq!(parse_currency_arg("EUR", &registry).unwrap(), "eur");
        assert_eq!(parse_currency_arg(" Chf ", &registry).unwrap(), "chf");
    }

    #[test]
    fn test_parse_currency_arg_invalid() {
        let registry = CurrencyRegistry::default();
        let err = parse_currency_arg("jpy", &registry).unwrap_err();
        assert!(err.to_string().contains("Unknown currency"));
        assert!(err.to_string().contains("jpy"));
        assert!(err.to_string().contains("usd, eur"));
    }

    #[test]
    fn test_startup_config_default() {
        let config = StartupConfig::default();
        assert_eq!(config.base, "usd");
        assert!(!config.print);
        assert!(config.cache_dir.is_none());
        assert_eq!(config.source_url, DEFAULT_SOURCE_URL);
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["fxtiers"]);
        assert_eq!(cli.base, "usd");
        assert!(!cli.print);
        assert!(cli.cache_dir.is_none());
    }

    #[test]
    fn test_cli_parse_all_flags() {
        let cli = Cli::parse_from([
            "fxtiers",
            "--base",
            "nzd",
            "--print",
            "--cache-dir",
            "/tmp/fx",
            "--source-url",
            "http://localhost:8080",
        ]);
        assert_eq!(cli.base, "nzd");
        assert!(cli.print);
        assert_eq!(cli.cache_dir, Some(PathBuf::from("/tmp/fx")));
        assert_eq!(cli.source_url, "http://localhost:8080");
    }

    #[test]
    fn test_startup_config_from_cli() {
        let registry = CurrencyRegistry::default();
        let cli = Cli::parse_from(["fxtiers", "-b", "BGN"]);
        let config = StartupConfig::from_cli(&cli, &registry).unwrap();
        assert_eq!(config.base, "bgn");
        assert!(!config.print);
    }

    #[test]
    fn test_startup_config_from_cli_invalid_currency() {
        let registry = CurrencyRegistry::default();
        let cli = Cli::parse_from(["fxtiers", "--base", "xyz"]);
        assert!(StartupConfig::from_cli(&cli, &registry).is_err());
    }
}
