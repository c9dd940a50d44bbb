//! Standard, premium and business fee tiers.

use super::discount::apply_premium_discount;
use super::error::FallbackReason;
use super::fallback::{fallback_business_services, fallback_standard_services};
use super::listing::{FeeListing, ServiceFeeEntry};
use std::fmt::Display;
use std::str::FromStr;

pub const STANDARD_TIER_SIZE: usize = 6;
pub const PREMIUM_TIER_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FeeTier {
    #[default]
    Standard,
    Premium,
    Business,
}

impl FeeTier {
    pub const ALL: [FeeTier; 3] = [FeeTier::Standard, FeeTier::Premium, FeeTier::Business];

    /// Status label shown next to each service in this tier.
    pub fn status(&self) -> &'static str {
        match self {
            FeeTier::Standard => "Active",
            FeeTier::Premium => "Discounted",
            FeeTier::Business => "Business",
        }
    }
}

impl Display for FeeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                FeeTier::Standard => "Standard",
                FeeTier::Premium => "Premium",
                FeeTier::Business => "Business",
            }
        )
    }
}

impl FromStr for FeeTier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(FeeTier::Standard),
            "premium" => Ok(FeeTier::Premium),
            "business" => Ok(FeeTier::Business),
            _ => Err(anyhow::anyhow!("Invalid fee tier: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeeTiers {
    pub standard: Vec<ServiceFeeEntry>,
    pub premium: Vec<ServiceFeeEntry>,
    pub business: Vec<ServiceFeeEntry>,
}

impl FeeTiers {
    /// Tiers built entirely from embedded data.
    pub fn fallback() -> Self {
        let standard = fallback_standard_services();
        let premium = premium_tier(&standard);
        Self {
            standard,
            premium,
            business: fallback_business_services(),
        }
    }

    /// Splits a remote listing into tiers.
    ///
    /// An audience without entries is replaced by its embedded list, and a
    /// reason is recorded for it.
    pub fn from_listing(listing: FeeListing) -> (Self, Vec<FallbackReason>) {
        let mut reasons = Vec::new();

        let (standard, premium) = if listing.customer.is_empty() {
            reasons.push(FallbackReason::DataShape(
                "no Customer fee entries".to_string(),
            ));
            let standard = fallback_standard_services();
            let premium = premium_tier(&standard);
            (standard, premium)
        } else {
            let mut standard = listing.customer;
            let mut extra = if standard.len() > STANDARD_TIER_SIZE {
                standard.split_off(STANDARD_TIER_SIZE)
            } else {
                Vec::new()
            };
            extra.truncate(PREMIUM_TIER_SIZE);

            let premium = if extra.is_empty() {
                premium_tier(&standard)
            } else {
                premium_tier(&extra)
            };
            (standard, premium)
        };

        let business = if listing.business.is_empty() {
            reasons.push(FallbackReason::DataShape(
                "no Business fee entries".to_string(),
            ));
            fallback_business_services()
        } else {
            listing.business
        };

        (
            Self {
                standard,
                premium,
                business,
            },
            reasons,
        )
    }

    pub fn entries(&self, tier: FeeTier) -> &[ServiceFeeEntry] {
        match tier {
            FeeTier::Standard => &self.standard,
            FeeTier::Premium => &self.premium,
            FeeTier::Business => &self.business,
        }
    }
}

fn premium_tier(source: &[ServiceFeeEntry]) -> Vec<ServiceFeeEntry> {
    source
        .iter()
        .map(|entry| ServiceFeeEntry {
            category: entry.category.clone(),
            service: format!("{} (Premium)", entry.service),
            fee: apply_premium_discount(&entry.fee),
            description: entry.description.clone(),
        })
        .collect()
}
