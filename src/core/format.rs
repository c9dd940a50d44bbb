//! Locale-aware number and currency formatting.

/// Numeric conventions of the locale a currency is usually displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleFormat {
    pub symbol: &'static str,
    pub symbol_after: bool,
    pub group_separator: char,
    pub decimal_separator: char,
}

const EN_US: LocaleFormat = LocaleFormat {
    symbol: "$",
    symbol_after: false,
    group_separator: ',',
    decimal_separator: '.',
};

impl LocaleFormat {
    pub fn for_currency(currency: &str) -> Self {
        match currency.to_uppercase().as_str() {
            "USD" | "CAD" => EN_US,
            "NGN" => LocaleFormat { symbol: "₦", ..EN_US },
            "GBP" => LocaleFormat { symbol: "£", ..EN_US },
            "GHS" => LocaleFormat { symbol: "GH₵", ..EN_US },
            "KES" => LocaleFormat { symbol: "Ksh", ..EN_US },
            "EUR" => LocaleFormat {
                symbol: "€",
                symbol_after: true,
                group_separator: '.',
                decimal_separator: ',',
            },
            _ => LocaleFormat { symbol: "", ..EN_US },
        }
    }
}

/// Formats `value` with exactly `decimals` fraction digits and the locale's
/// grouping.
pub fn format_number(value: f64, decimals: usize, locale: &LocaleFormat) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(locale.group_separator);
        }
        grouped.push(digit);
    }
    if let Some(frac_part) = frac_part {
        grouped.push(locale.decimal_separator);
        grouped.push_str(frac_part);
    }

    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    if value.is_sign_negative() && !is_zero {
        grouped.insert(0, '-');
    }
    grouped
}

/// Formats an amount of `currency` with two fraction digits, e.g. "$2.50",
/// "2,50 €". Currencies without a known symbol are prefixed by their code.
pub fn format_currency(value: f64, currency: &str) -> String {
    let locale = LocaleFormat::for_currency(currency);
    let number = format_number(value, 2, &locale);
    match (locale.symbol, locale.symbol_after) {
        ("", _) => format!("{} {number}", currency.to_uppercase()),
        (symbol, true) => format!("{number} {symbol}"),
        (symbol, false) => format!("{symbol}{number}"),
    }
}
