use super::ui;
use crate::core::{FeeTier, FeeTiers, Resolution};
use anyhow::Result;
use comfy_table::Cell;

/// Renders one tier as a table with service, fee, description and status.
pub fn display_tier(tiers: &FeeTiers, tier: FeeTier) -> String {
    let mut table = ui::new_styled_table();

    table.set_header(vec![
        ui::header_cell("Service"),
        ui::header_cell("Fee"),
        ui::header_cell("Description"),
        ui::header_cell("Status"),
    ]);

    let entries = tiers.entries(tier);
    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.service),
            ui::fee_cell(&entry.fee),
            Cell::new(&entry.description),
            Cell::new(tier.status()),
        ]);
    }

    let mut output = format!(
        "{} fees\n\n",
        ui::style_text(&tier.to_string(), ui::StyleType::Title)
    );
    if entries.is_empty() {
        output.push_str(&ui::style_text(
            "No services listed for this tier.",
            ui::StyleType::Subtle,
        ));
    } else {
        output.push_str(&table.to_string());
    }
    output
}

pub fn run(resolution: &Resolution, tier: Option<FeeTier>) -> Result<()> {
    let selected: Vec<FeeTier> = match tier {
        Some(tier) => vec![tier],
        None => FeeTier::ALL.to_vec(),
    };

    for (i, tier) in selected.iter().enumerate() {
        println!("{}", display_tier(&resolution.tiers, *tier));
        if i < selected.len() - 1 {
            ui::print_separator();
        }
    }

    Ok(())
}
