//! Resolves the fee schedule, rate table and fee tiers for a session.

use super::currency::CurrencyRateProvider;
use super::discount::extract_fee_fraction;
use super::error::FallbackReason;
use super::fallback::fallback_rate_table;
use super::listing::FeeListingProvider;
use super::rates::RateTable;
use super::tiers::FeeTiers;
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

/// Immutable fee and rate configuration used by every calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub fee_rate: f64,
    pub rates: RateTable,
    pub resolved_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(fee_rate: f64, rates: RateTable) -> Self {
        Self {
            fee_rate,
            rates,
            resolved_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Resolution {
    pub snapshot: Snapshot,
    pub tiers: FeeTiers,
    pub used_fallback: bool,
    /// False when a request failed and everything comes from embedded data.
    pub live_data: bool,
    pub fallback_reasons: Vec<FallbackReason>,
}

impl Resolution {
    fn fallback(fee_rate: f64, reason: FallbackReason) -> Self {
        Self {
            snapshot: Snapshot::new(fee_rate, fallback_rate_table()),
            tiers: FeeTiers::fallback(),
            used_fallback: true,
            live_data: false,
            fallback_reasons: vec![reason],
        }
    }

    /// One-line message for the user when any embedded data is shown.
    pub fn fallback_notice(&self) -> Option<String> {
        if !self.used_fallback {
            return None;
        }
        if !self.live_data {
            return Some(
                "Live fee data is unavailable, showing standard rates and fees.".to_string(),
            );
        }

        let reasons = self
            .fallback_reasons
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Some(format!("Some fee tiers use built-in data ({reasons})."))
    }
}

pub struct RateAndFeeResolver<'a> {
    listing_provider: &'a (dyn FeeListingProvider + Send + Sync),
    rate_provider: &'a (dyn CurrencyRateProvider + Send + Sync),
    rate_from: String,
    rate_to: String,
    fee_rate: f64,
}

impl<'a> RateAndFeeResolver<'a> {
    /// `fee_rate` is the fee schedule in effect until a remote listing
    /// provides a percentage.
    pub fn new(
        listing_provider: &'a (dyn FeeListingProvider + Send + Sync),
        rate_provider: &'a (dyn CurrencyRateProvider + Send + Sync),
        rate_from: &str,
        rate_to: &str,
        fee_rate: f64,
    ) -> Self {
        Self {
            listing_provider,
            rate_provider,
            rate_from: rate_from.to_uppercase(),
            rate_to: rate_to.to_uppercase(),
            fee_rate,
        }
    }

    /// Fetches the fee listing and the exchange rate concurrently.
    ///
    /// If either request fails, every output comes from fallback data. No
    /// remote data from a failed resolution is kept.
    #[instrument(
        name = "ResolveFeesAndRates",
        skip(self),
        fields(from = %self.rate_from, to = %self.rate_to)
    )]
    pub async fn resolve(&self) -> Resolution {
        let (listing, rate) = futures::join!(
            self.listing_provider.fetch_listing(),
            self.rate_provider.get_rate(&self.rate_from, &self.rate_to)
        );

        let (listing, rate) = match (listing, rate) {
            (Ok(listing), Ok(rate)) => (listing, rate),
            (Err(e), _) | (_, Err(e)) => {
                let reason = FallbackReason::from_error(&e);
                warn!(%reason, "Remote fee data unavailable, using fallback data");
                return Resolution::fallback(self.fee_rate, reason);
            }
        };

        let fee_rate = listing
            .customer
            .iter()
            .find_map(|entry| extract_fee_fraction(&entry.fee))
            .unwrap_or_else(|| {
                debug!("No percentage in customer fees, keeping configured fee rate");
                self.fee_rate
            });

        let mut rates = fallback_rate_table();
        match rate {
            Some(rate) => {
                if rates.set_pair(&self.rate_from, &self.rate_to, rate) {
                    debug!(rate, "Updated exchange rate from remote source");
                } else {
                    warn!(rate, "Ignoring unusable exchange rate");
                }
            }
            None => debug!("Exchange response carried no rate"),
        }

        let (tiers, fallback_reasons) = FeeTiers::from_listing(listing);
        for reason in &fallback_reasons {
            warn!(%reason, "Using fallback fee tier");
        }

        info!(fee_rate, "Resolved fee schedule");
        Resolution {
            snapshot: Snapshot::new(fee_rate, rates),
            tiers,
            used_fallback: !fallback_reasons.is_empty(),
            live_data: true,
            fallback_reasons,
        }
    }
}
