//! Currency registry
//!
//! The registry decides which currencies are classified against the selected
//! base. It is a plain value handed to the classifier and the app, seeded from
//! the static `CURRENCIES` list.

use super::Currency;

/// Default set of currencies shown in the tables
pub static CURRENCIES: [Currency; 7] = [
    Currency {
        code: "usd",
        name: "U.S. Dollar",
    },
    Currency {
        code: "eur",
        name: "Euro",
    },
    Currency {
        code: "aud",
        name: "Australian Dollar",
    },
    Currency {
        code: "cad",
        name: "Canadian Dollar",
    },
    Currency {
        code: "chf",
        name: "Swiss Franc",
    },
    Currency {
        code: "nzd",
        name: "New Zealand Dollar",
    },
    Currency {
        code: "bgn",
        name: "Bulgarian lev",
    },
];

/// Ordered set of known currencies
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyRegistry {
    currencies: Vec<Currency>,
}

impl Default for CurrencyRegistry {
    fn default() -> Self {
        Self::new(CURRENCIES.to_vec())
    }
}

impl CurrencyRegistry {
    /// Creates a registry from an explicit list, preserving its order
    pub fn new(currencies: Vec<Currency>) -> Self {
        Self { currencies }
    }

    /// All currencies in registry order
    pub fn all(&self) -> &[Currency] {
        &self.currencies
    }

    /// Currency codes in registry order
    pub fn codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.currencies.iter().map(|c| c.code)
    }

    /// Looks up a currency by code (case-insensitive)
    pub fn get(&self, code: &str) -> Option<&Currency> {
        self.currencies
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Index of the currency with the given code
    pub fn position(&self, code: &str) -> Option<usize> {
        self.currencies
            .iter()
            .position(|c| c.code.eq_ignore_ascii_case(code))
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }
}
