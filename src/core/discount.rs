//! Parsing of free-text fee descriptions.
//!
//! Remote fee listings carry fees as display strings ("0.5%", "$2 per card",
//! "FREE"). Only two patterns are recognised: a percentage `<number>%` and a
//! dollar amount `$<number>`. Anything else is treated as opaque text.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Multiplier applied to premium fees.
pub const PREMIUM_DISCOUNT_FACTOR: f64 = 0.7;

static PERCENTAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)%").expect("Invalid regex pattern"));

static DOLLAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\d+(?:\.\d+)?)").expect("Invalid regex pattern"));

/// Returns the first percentage in `text` as a fraction, e.g. "0.25%" -> 0.0025.
pub fn extract_fee_fraction(text: &str) -> Option<f64> {
    first_number(&PERCENTAGE_REGEX, text).map(|pct| pct / 100.0)
}

/// Applies the premium discount to a fee description.
///
/// Only the first percentage is discounted, or the first dollar amount when no
/// percentage is present. "FREE" stays free, and unrecognised text is marked
/// as discounted.
pub fn apply_premium_discount(text: &str) -> String {
    if let Some(pct) = first_number(&PERCENTAGE_REGEX, text) {
        let discounted = round_to(pct * PREMIUM_DISCOUNT_FACTOR, 1);
        return PERCENTAGE_REGEX
            .replacen(text, 1, |_: &Captures| format!("{discounted:.1}%"))
            .into_owned();
    }

    if let Some(amount) = first_number(&DOLLAR_REGEX, text) {
        let discounted = round_to(amount * PREMIUM_DISCOUNT_FACTOR, 2);
        return DOLLAR_REGEX
            .replacen(text, 1, |_: &Captures| format!("${discounted:.2}"))
            .into_owned();
    }

    if text.contains("FREE") {
        return "FREE".to_string();
    }

    format!("{text} (Discounted)")
}

fn first_number(regex: &Regex, text: &str) -> Option<f64> {
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
