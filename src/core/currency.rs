//! Currency conversion abstractions

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    /// Fetches the multiplier for `from -> to`.
    ///
    /// `Ok(None)` means the source answered without a usable rate.
    async fn get_rate(&self, from: &str, to: &str) -> Result<Option<f64>>;
}
