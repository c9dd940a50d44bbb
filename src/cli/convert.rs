use super::ui;
use crate::core::calculator::{self, Conversion, CurrencyPair};
use crate::core::format::format_currency;
use crate::core::{Resolution, Snapshot};
use anyhow::Result;
use comfy_table::Cell;

impl Conversion {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();

        table.set_header(vec![ui::header_cell("Item"), ui::header_cell("Value")]);
        table.add_row(vec![
            Cell::new("You send"),
            ui::amount_cell(&format_currency(self.amount, &self.pair.send)),
        ]);
        table.add_row(vec![Cell::new("Fee"), ui::amount_cell(&self.formatted_fee())]);
        table.add_row(vec![
            Cell::new("Exchange rate"),
            ui::amount_cell(&self.rate_description()),
        ]);
        table.add_row(vec![
            Cell::new("Recipient gets").add_attribute(comfy_table::Attribute::Bold),
            ui::total_cell(&self.formatted_converted()),
        ]);

        let mut output = format!(
            "Conversion: {}\n\n",
            ui::style_text(
                &format!("{} → {}", self.pair.send, self.pair.receive),
                ui::StyleType::Title
            )
        );
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\n{}",
            ui::style_text(&self.fee_description(), ui::StyleType::Subtle)
        ));
        output
    }
}

pub fn convert(
    snapshot: &Snapshot,
    amount_input: &str,
    pair: &mut CurrencyPair,
    swap: bool,
) -> Conversion {
    let amount = calculator::parse_amount(amount_input);
    if swap {
        calculator::swap_and_compute(snapshot, amount, pair)
    } else {
        calculator::compute(snapshot, amount, pair)
    }
}

pub fn run(
    resolution: &Resolution,
    amount_input: &str,
    mut pair: CurrencyPair,
    swap: bool,
) -> Result<()> {
    for currency in [&pair.send, &pair.receive] {
        if !resolution.snapshot.rates.contains(currency) {
            ui::print_notice(&format!(
                "No exchange rate known for {currency}, converting at 1:1."
            ));
        }
    }

    let conversion = convert(&resolution.snapshot, amount_input, &mut pair, swap);
    println!("{}", conversion.display_as_table());
    Ok(())
}
