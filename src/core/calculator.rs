//! Fee and conversion arithmetic over a resolved [`Snapshot`].

use super::format::{LocaleFormat, format_currency, format_number};
use super::resolver::Snapshot;
use tracing::debug;

/// The currencies selected for a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyPair {
    pub send: String,
    pub receive: String,
}

impl CurrencyPair {
    pub fn new(send: &str, receive: &str) -> Self {
        Self {
            send: send.trim().to_uppercase(),
            receive: receive.trim().to_uppercase(),
        }
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.send, &mut self.receive);
    }

    pub fn swapped(&self) -> Self {
        Self {
            send: self.receive.clone(),
            receive: self.send.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub pair: CurrencyPair,
    pub amount: f64,
    pub fee_rate: f64,
    pub fee_amount: f64,
    pub rate: f64,
    pub converted_amount: f64,
}

impl Conversion {
    /// Fee in the send currency, e.g. "$2.50".
    pub fn formatted_fee(&self) -> String {
        format_currency(self.fee_amount, &self.pair.send)
    }

    /// Converted amount with the send locale's grouping followed by the
    /// receive currency code, e.g. "1,476,300.00 NGN".
    pub fn formatted_converted(&self) -> String {
        let locale = LocaleFormat::for_currency(&self.pair.send);
        format!(
            "{} {}",
            format_number(self.converted_amount, 2, &locale),
            self.pair.receive
        )
    }

    pub fn display_rate(&self) -> String {
        format!("{:.4}", self.rate)
    }

    pub fn fee_description(&self) -> String {
        format!(
            "Fee: {} ({}%)",
            self.formatted_fee(),
            trim_fraction(self.fee_rate * 100.0)
        )
    }

    pub fn rate_description(&self) -> String {
        format!(
            "1 {} = {} {}",
            self.pair.send,
            self.display_rate(),
            self.pair.receive
        )
    }
}

/// Parses user input such as "1,000.50". Anything that does not parse to a
/// non-negative finite number is treated as zero.
pub fn parse_amount(input: &str) -> f64 {
    input
        .trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount >= 0.0)
        .unwrap_or(0.0)
}

/// Amounts whose fee or converted value would overflow are treated like
/// invalid input and computed as zero.
pub fn compute(snapshot: &Snapshot, amount: f64, pair: &CurrencyPair) -> Conversion {
    let rate = snapshot.rates.rate(&pair.send, &pair.receive);
    let (amount, fee_amount, converted_amount) =
        match convert_amount(amount, snapshot.fee_rate, rate) {
            Some(values) => values,
            None => {
                debug!(amount, "Conversion out of range, treating amount as zero");
                (0.0, 0.0, 0.0)
            }
        };

    Conversion {
        pair: pair.clone(),
        amount,
        fee_rate: snapshot.fee_rate,
        fee_amount,
        rate,
        converted_amount,
    }
}

fn convert_amount(amount: f64, fee_rate: f64, rate: f64) -> Option<(f64, f64, f64)> {
    let fee_amount = amount * fee_rate;
    let converted_amount = (amount - fee_amount) * rate;
    [amount, fee_amount, converted_amount]
        .iter()
        .all(|value| value.is_finite())
        .then_some((amount, fee_amount, converted_amount))
}

/// Parses raw input and computes the conversion in one step.
pub fn compute_input(snapshot: &Snapshot, input: &str, pair: &CurrencyPair) -> Conversion {
    compute(snapshot, parse_amount(input), pair)
}

/// Swaps the selected currencies and recomputes for the new direction.
pub fn swap_and_compute(snapshot: &Snapshot, amount: f64, pair: &mut CurrencyPair) -> Conversion {
    pair.swap();
    compute(snapshot, amount, pair)
}

fn trim_fraction(value: f64) -> String {
    let text = format!("{value:.4}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
