//! Terminal front-end for the fee calculator

pub mod convert;
pub mod fees;
pub mod interactive;
pub mod rates;
pub mod setup;
pub mod ui;

use crate::core::{RateAndFeeResolver, Resolution};

/// Resolves fees and rates behind a spinner, and tells the user when
/// embedded data is shown in place of some or all live data.
pub async fn resolve_with_progress(resolver: &RateAndFeeResolver<'_>) -> Resolution {
    let pb = ui::new_spinner("Fetching fees and exchange rates...");
    let resolution = resolver.resolve().await;
    pb.finish_and_clear();

    if let Some(notice) = resolution.fallback_notice() {
        ui::print_notice(&notice);
    }
    resolution
}
