//! Plain-text rendering of classified rates
//!
//! Used by `--print` and shared with the terminal UI for row formatting.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write;

use crate::classify::{Classification, Group, Tier};
use crate::data::Currency;

/// Formats a rate with exactly two decimals
///
/// Rounds the exact binary value half away from zero, so `0.625` shows as
/// `0.63` while `2.675` (stored just below the midpoint) shows as `2.67`.
pub fn format_rate(value: f64) -> String {
    match Decimal::from_f64_retain(value) {
        Some(exact) => {
            let rounded = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.2}", rounded)
        }
        // NaN, infinities and values beyond Decimal's range
        None => format!("{:.2}", value),
    }
}

/// Labels are shown upper-cased (`usd - eur` -> `USD - EUR`)
pub fn format_label(label: &str) -> String {
    label.to_uppercase()
}

/// Display rows for a group: ascending by value, formatted
pub fn table_rows(group: &Group) -> Vec<(String, String)> {
    group
        .sorted()
        .iter()
        .map(|(label, value)| (format_label(label), format_rate(*value)))
        .collect()
}

/// Header line naming the base currency and the rates' date
pub fn header_line(base: &Currency, date: Option<&str>) -> String {
    match date {
        Some(date) => format!(
            "Base: {} ({})  Rates as of {}",
            base.code.to_uppercase(),
            base.name,
            date
        ),
        None => format!("Base: {} ({})", base.code.to_uppercase(), base.name),
    }
}

/// Renders all three groups as plain text
pub fn render_plain(classification: &Classification, base: &Currency, date: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", header_line(base, date));

    for tier in Tier::ALL {
        let group = classification.group(tier);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", tier.title());
        for (label, value) in table_rows(group) {
            let _ = writeln!(out, "  {:<12}{:>10}", label, value);
        }
        let _ = writeln!(out, "  Near parity: {}", group.near_parity_count());
    }

    out
}
