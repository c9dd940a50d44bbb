//! Embedded data used when the remote sources are unavailable or malformed.

use super::listing::ServiceFeeEntry;
use super::rates::RateTable;

pub const FALLBACK_FEE_RATE: f64 = 0.0025;

pub const FALLBACK_BASE_CURRENCY: &str = "USD";

/// Units of each currency per one US dollar.
pub const FALLBACK_USD_QUOTES: &[(&str, f64)] = &[
    ("NGN", 1480.0),
    ("GBP", 0.79),
    ("EUR", 0.92),
    ("CAD", 1.36),
    ("GHS", 12.5),
    ("KES", 129.0),
];

const STANDARD_SERVICES: &[(&str, &str, &str, &str)] = &[
    ("Transfers", "Local Transfer", "FREE", "Send money to local bank accounts"),
    ("Transfers", "International Transfer", "0.25%", "Cross-border transfers at the mid-market rate"),
    ("Cards", "Virtual Card Issuance", "$2", "One-time fee per virtual card"),
    ("Cards", "Card Funding", "1%", "Top up a card from your wallet balance"),
    ("Withdrawals", "ATM Withdrawal", "$1.50", "Per withdrawal at partner ATMs"),
    ("Account", "Account Maintenance", "FREE", "No monthly maintenance charges"),
];

const BUSINESS_SERVICES: &[(&str, &str, &str, &str)] = &[
    ("Payments", "Bulk Payouts", "0.5%", "Pay many recipients in a single batch"),
    ("Payments", "Payment Links", "1.5%", "Collect payments through shareable links"),
    ("Treasury", "FX Conversion", "0.2%", "Convert between supported currencies"),
    ("Treasury", "Invoice Settlement", "$5", "Per settled cross-border invoice"),
    ("Account", "Multi-user Access", "Custom", "Role-based access for finance teams"),
];

pub fn fallback_rate_table() -> RateTable {
    RateTable::from_base_quotes(FALLBACK_BASE_CURRENCY, FALLBACK_USD_QUOTES)
}

pub fn fallback_standard_services() -> Vec<ServiceFeeEntry> {
    to_entries(STANDARD_SERVICES)
}

pub fn fallback_business_services() -> Vec<ServiceFeeEntry> {
    to_entries(BUSINESS_SERVICES)
}

fn to_entries(rows: &[(&str, &str, &str, &str)]) -> Vec<ServiceFeeEntry> {
    rows.iter()
        .map(|(category, service, fee, description)| {
            ServiceFeeEntry::new(category, service, fee, description)
        })
        .collect()
}
