//! Directed currency-pair multipliers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maps a source currency to the multiplier for each target currency.
///
/// Every currency known to the table maps to itself with a multiplier of 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    rates: BTreeMap<String, BTreeMap<String, f64>>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a fully connected table from quotes against a single base
    /// currency, e.g. `USD -> {NGN: 1480.0, GBP: 0.79}`.
    pub fn from_base_quotes(base: &str, quotes: &[(&str, f64)]) -> Self {
        let mut per_base: Vec<(String, f64)> = vec![(base.to_uppercase(), 1.0)];
        per_base.extend(
            quotes
                .iter()
                .filter(|(_, q)| q.is_finite() && *q > 0.0)
                .map(|(code, q)| (code.to_uppercase(), *q)),
        );

        let mut table = Self::new();
        for (from, from_quote) in &per_base {
            for (to, to_quote) in &per_base {
                let rate = if from == to {
                    1.0
                } else {
                    to_quote / from_quote
                };
                table
                    .rates
                    .entry(from.clone())
                    .or_default()
                    .insert(to.clone(), rate);
            }
        }
        table
    }

    /// Returns the multiplier for `from -> to`. Unknown pairs are treated as
    /// the identity.
    pub fn rate(&self, from: &str, to: &str) -> f64 {
        self.get(from, to).unwrap_or(1.0)
    }

    pub fn get(&self, from: &str, to: &str) -> Option<f64> {
        let from = from.to_uppercase();
        let to = to.to_uppercase();
        if from == to {
            return Some(1.0);
        }
        self.rates.get(&from).and_then(|row| row.get(&to)).copied()
    }

    /// Overwrites `from -> to` with `rate` and `to -> from` with its inverse.
    ///
    /// Non-finite or non-positive rates are rejected and leave the table
    /// untouched. Returns whether the table changed.
    pub fn set_pair(&mut self, from: &str, to: &str, rate: f64) -> bool {
        if !rate.is_finite() || rate <= 0.0 {
            return false;
        }
        let from = from.to_uppercase();
        let to = to.to_uppercase();
        if from == to {
            return false;
        }

        self.ensure_identity(&from);
        self.ensure_identity(&to);
        self.rates
            .entry(from.clone())
            .or_default()
            .insert(to.clone(), rate);
        self.rates.entry(to).or_default().insert(from, 1.0 / rate);
        true
    }

    /// Currency codes known to the table, in sorted order.
    pub fn currencies(&self) -> Vec<&str> {
        self.rates.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, currency: &str) -> bool {
        self.rates.contains_key(&currency.to_uppercase())
    }

    fn ensure_identity(&mut self, currency: &str) {
        self.rates
            .entry(currency.to_string())
            .or_default()
            .insert(currency.to_string(), 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RateTable {
        RateTable::from_base_quotes("USD", &[("NGN", 1480.0), ("GBP", 0.8)])
    }

    #[test]
    fn test_every_currency_maps_to_itself() {
        let table = sample();
        for currency in table.currencies() {
            assert_eq!(table.get(currency, currency), Some(1.0));
        }
        assert_eq!(table.currencies(), vec!["GBP", "NGN", "USD"]);
    }

    #[test]
    fn test_cross_rates_from_base_quotes() {
        let table = sample();
        assert_eq!(table.rate("USD", "NGN"), 1480.0);
        assert!((table.rate("NGN", "USD") - 1.0 / 1480.0).abs() < 1e-12);
        assert!((table.rate("GBP", "NGN") - 1850.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_pair_is_identity() {
        let table = sample();
        assert_eq!(table.get("USD", "JPY"), None);
        assert_eq!(table.rate("USD", "JPY"), 1.0);
        assert_eq!(table.rate("usd", "ngn"), 1480.0);
    }

    #[test]
    fn test_set_pair_updates_both_directions() {
        let mut table = sample();
        assert!(table.set_pair("USD", "NGN", 1500.0));
        assert_eq!(table.rate("USD", "NGN"), 1500.0);
        assert_eq!(table.rate("NGN", "USD"), 1.0 / 1500.0);
    }

    #[test]
    fn test_set_pair_rejects_unusable_rates() {
        let mut table = sample();
        assert!(!table.set_pair("USD", "NGN", 0.0));
        assert!(!table.set_pair("USD", "NGN", -3.0));
        assert!(!table.set_pair("USD", "NGN", f64::NAN));
        assert!(!table.set_pair("USD", "USD", 2.0));
        assert_eq!(table, sample());
    }

    #[test]
    fn test_set_pair_adds_new_currency_with_identity() {
        let mut table = RateTable::new();
        assert!(table.set_pair("EUR", "CHF", 0.95));
        assert!(table.contains("EUR"));
        assert!(table.contains("chf"));
        assert_eq!(table.get("CHF", "CHF"), Some(1.0));
    }
}
