use super::ui;
use crate::core::Snapshot;
use anyhow::Result;
use comfy_table::Cell;

/// Renders the rate table as a matrix, rows are the send currency.
pub fn display_rates(snapshot: &Snapshot) -> String {
    let currencies = snapshot.rates.currencies();
    let mut table = ui::new_styled_table();

    let mut header = vec![ui::header_cell("From \\ To")];
    header.extend(currencies.iter().map(|c| ui::header_cell(c)));
    table.set_header(header);

    for from in &currencies {
        let mut row = vec![Cell::new(from).add_attribute(comfy_table::Attribute::Bold)];
        row.extend(
            currencies
                .iter()
                .map(|to| ui::amount_cell(&format!("{:.4}", snapshot.rates.rate(from, to)))),
        );
        table.add_row(row);
    }

    let mut output = format!(
        "{}\n\n",
        ui::style_text("Exchange rates", ui::StyleType::Title)
    );
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n\nFee: {}  {}",
        ui::style_text(
            &format!("{:.2}%", snapshot.fee_rate * 100.0),
            ui::StyleType::TotalValue
        ),
        ui::style_text(
            &format!("Resolved at {}", snapshot.resolved_at.format("%Y-%m-%d %H:%M:%S UTC")),
            ui::StyleType::Subtle
        )
    ));
    output
}

pub fn run(snapshot: &Snapshot) -> Result<()> {
    println!("{}", display_rates(snapshot));
    Ok(())
}
