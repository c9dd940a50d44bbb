//! Core fee and conversion logic

pub mod calculator;
pub mod config;
pub mod currency;
pub mod discount;
pub mod error;
pub mod fallback;
pub mod format;
pub mod listing;
pub mod log;
pub mod rates;
pub mod resolver;
pub mod tiers;

// Re-export main types for cleaner imports
pub use calculator::{Conversion, CurrencyPair};
pub use currency::CurrencyRateProvider;
pub use listing::{FeeListing, FeeListingProvider, ServiceFeeEntry};
pub use rates::RateTable;
pub use resolver::{RateAndFeeResolver, Resolution, Snapshot};
pub use tiers::{FeeTier, FeeTiers};
