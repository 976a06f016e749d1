//! Rate classification into three tiers
//!
//! For every registry currency other than the base, the forward rate
//! (`base -> code`) and its reciprocal (`code -> base`) are sorted into one of
//! three groups by value:
//!
//! | Group  | Range            |
//! |--------|------------------|
//! | group1 | `v < 1`          |
//! | group2 | `1 <= v < 1.5`   |
//! | group3 | `v >= 1.5`       |
//!
//! Near-parity counting uses a different, closed range: `0.5 <= v <= 1.5`.

use std::cmp::Ordering;

use crate::data::{CurrencyRegistry, RateTable, Rates};
use crate::error::{RatesError, Result};

/// Lower bound of group2
const GROUP2_FLOOR: f64 = 1.0;

/// Lower bound of group3
const GROUP3_FLOOR: f64 = 1.5;

/// Inclusive lower bound of the near-parity range
pub const NEAR_PARITY_MIN: f64 = 0.5;

/// Inclusive upper bound of the near-parity range
pub const NEAR_PARITY_MAX: f64 = 1.5;

/// One of the three rate buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Group1,
    Group2,
    Group3,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Group1, Tier::Group2, Tier::Group3];

    /// Picks the tier for a rate; lower bounds are inclusive
    pub fn for_rate(value: f64) -> Tier {
        if value < GROUP2_FLOOR {
            Tier::Group1
        } else if value < GROUP3_FLOOR {
            Tier::Group2
        } else {
            Tier::Group3
        }
    }

    /// Stable identifier (`group1`, `group2`, `group3`)
    pub fn id(&self) -> &'static str {
        match self {
            Tier::Group1 => "group1",
            Tier::Group2 => "group2",
            Tier::Group3 => "group3",
        }
    }

    /// Display title
    pub fn title(&self) -> &'static str {
        match self {
            Tier::Group1 => "Group 1 (< 1)",
            Tier::Group2 => "Group 2 (1 - 1.5)",
            Tier::Group3 => "Group 3 (>= 1.5)",
        }
    }
}

/// Whether a rate lies in `[0.5, 1.5]`
pub fn is_near_parity(value: f64) -> bool {
    (NEAR_PARITY_MIN..=NEAR_PARITY_MAX).contains(&value)
}

/// Labelled rates in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    entries: Vec<(String, f64)>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: String, value: f64) {
        self.entries.push((label, value));
    }

    /// Entries in the order they were added
    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a rate by label
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| *v)
    }

    /// Entries sorted ascending by value; ties keep insertion order
    pub fn sorted(&self) -> Vec<(String, f64)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        sorted
    }

    /// Number of entries within `[0.5, 1.5]`
    pub fn near_parity_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, v)| is_near_parity(*v))
            .count()
    }
}

/// Result of one classification run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub group1: Group,
    pub group2: Group,
    pub group3: Group,
}

impl Classification {
    pub fn group(&self, tier: Tier) -> &Group {
        match tier {
            Tier::Group1 => &self.group1,
            Tier::Group2 => &self.group2,
            Tier::Group3 => &self.group3,
        }
    }

    fn group_mut(&mut self, tier: Tier) -> &mut Group {
        match tier {
            Tier::Group1 => &mut self.group1,
            Tier::Group2 => &mut self.group2,
            Tier::Group3 => &mut self.group3,
        }
    }

    fn insert(&mut self, label: String, value: f64) {
        self.group_mut(Tier::for_rate(value)).push(label, value);
    }

    /// Total number of classified entries across all groups
    pub fn total(&self) -> usize {
        Tier::ALL.iter().map(|t| self.group(*t).len()).sum()
    }
}

/// Classifies the base's forward rates against every registry currency
///
/// The inverse rate is always derived as `1 / forward`, even when the source
/// publishes its own reverse rates.
///
/// # Returns
/// * `Ok(Classification)` with two entries per non-base registry currency
/// * `Err(RatesError::MissingRate)` if a registry currency has no forward rate
pub fn classify(rates: &Rates, base: &str, registry: &CurrencyRegistry) -> Result<Classification> {
    let base = base.to_lowercase();
    let mut classification = Classification::default();

    for code in registry.codes().filter(|code| *code != base) {
        let value = *rates.get(code).ok_or_else(|| RatesError::MissingRate {
            base: base.clone(),
            code: code.to_string(),
        })?;
        let inverse = 1.0 / value;

        classification.insert(format!("{} - {}", base, code), value);
        classification.insert(format!("{} - {}", code, base), inverse);
    }

    Ok(classification)
}

/// Classifies using the `base` section of a full rate table
pub fn classify_table(
    table: &RateTable,
    base: &str,
    registry: &CurrencyRegistry,
) -> Result<Classification> {
    let base = base.to_lowercase();
    let empty = Rates::new();
    let rates = table.rates_for(&base).unwrap_or(&empty);
    classify(rates, &base, registry)
}
