//! Line-oriented calculator session.
//!
//! Each line is either an amount, which recomputes the conversion, or one of
//! the commands `swap`, `tier <name>`, `help` and `quit`.

use super::{fees, ui};
use crate::core::calculator::{self, CurrencyPair};
use crate::core::{FeeTier, Resolution};
use anyhow::{Context, Result};
use console::Term;
use std::io::{self, BufRead, Write};
use tracing::debug;

const HELP: &str =
    "Enter an amount to convert, or one of: swap, tier <standard|premium|business>, help, quit";

#[derive(Debug, PartialEq)]
pub enum SessionOutput {
    Show(String),
    Quit,
}

/// Calculator state for one interactive run. The snapshot is never modified.
pub struct Session<'a> {
    resolution: &'a Resolution,
    pair: CurrencyPair,
    amount: f64,
    active_tier: FeeTier,
}

impl<'a> Session<'a> {
    pub fn new(resolution: &'a Resolution, pair: CurrencyPair) -> Self {
        Self {
            resolution,
            pair,
            amount: 0.0,
            active_tier: FeeTier::default(),
        }
    }

    pub fn pair(&self) -> &CurrencyPair {
        &self.pair
    }

    pub fn active_tier(&self) -> FeeTier {
        self.active_tier
    }

    pub fn handle(&mut self, line: &str) -> SessionOutput {
        let line = line.trim();
        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, argument)) => (command, argument.trim()),
            None => (line, ""),
        };

        match command.to_lowercase().as_str() {
            "quit" | "exit" | "q" => SessionOutput::Quit,
            "help" | "?" => SessionOutput::Show(HELP.to_string()),
            "swap" => {
                let conversion = calculator::swap_and_compute(
                    &self.resolution.snapshot,
                    self.amount,
                    &mut self.pair,
                );
                SessionOutput::Show(conversion.display_as_table())
            }
            "tier" => match argument.parse::<FeeTier>() {
                Ok(tier) => {
                    self.active_tier = tier;
                    SessionOutput::Show(fees::display_tier(&self.resolution.tiers, tier))
                }
                Err(e) => {
                    SessionOutput::Show(ui::style_text(&e.to_string(), ui::StyleType::Warning))
                }
            },
            _ => {
                self.amount = calculator::parse_amount(line);
                let conversion =
                    calculator::compute(&self.resolution.snapshot, self.amount, &self.pair);
                SessionOutput::Show(conversion.display_as_table())
            }
        }
    }
}

pub fn run(resolution: &Resolution, pair: CurrencyPair) -> Result<()> {
    let stdin = io::stdin();
    run_session(resolution, pair, stdin.lock(), &mut Term::stdout())
}

/// Reads commands from `input` until `quit` or end of input. Blank lines only
/// repeat the prompt.
pub fn run_session<R: BufRead, W: Write>(
    resolution: &Resolution,
    pair: CurrencyPair,
    input: R,
    output: &mut W,
) -> Result<()> {
    let mut session = Session::new(resolution, pair);

    writeln!(output, "{}", ui::style_text(HELP, ui::StyleType::Subtle))?;
    writeln!(output, "{}", fees::display_tier(&resolution.tiers, session.active_tier()))?;

    let mut lines = input.lines();
    loop {
        write!(
            output,
            "{} → {} > ",
            session.pair().send,
            session.pair().receive
        )?;
        output.flush()?;

        let Some(line) = lines.next() else {
            debug!("End of input");
            writeln!(output)?;
            break;
        };
        let line = line.context("Failed to read input line")?;
        debug!(input = %line, "Read input line");
        if line.trim().is_empty() {
            continue;
        }

        match session.handle(&line) {
            SessionOutput::Show(text) => writeln!(output, "{text}")?,
            SessionOutput::Quit => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fallback::fallback_rate_table;
    use crate::core::{FeeTiers, Snapshot};

    fn resolution() -> Resolution {
        Resolution {
            snapshot: Snapshot::new(0.0025, fallback_rate_table()),
            tiers: FeeTiers::fallback(),
            used_fallback: true,
            live_data: false,
            fallback_reasons: Vec::new(),
        }
    }

    #[test]
    fn test_amount_then_swap() {
        let resolution = resolution();
        let mut session = Session::new(&resolution, CurrencyPair::new("USD", "NGN"));

        let SessionOutput::Show(output) = session.handle("1,000") else {
            panic!("Expected output");
        };
        assert!(output.contains("1,476,300.00 NGN"));

        let SessionOutput::Show(output) = session.handle("swap") else {
            panic!("Expected output");
        };
        assert_eq!(session.pair(), &CurrencyPair::new("NGN", "USD"));
        assert!(output.contains("USD"));
    }

    #[test]
    fn test_tier_selection() {
        let resolution = resolution();
        let mut session = Session::new(&resolution, CurrencyPair::new("USD", "NGN"));
        assert_eq!(session.active_tier(), FeeTier::Standard);

        session.handle("tier business");
        assert_eq!(session.active_tier(), FeeTier::Business);

        session.handle("tier gold");
        assert_eq!(session.active_tier(), FeeTier::Business);
    }

    #[test]
    fn test_invalid_amount_is_zero_and_quit() {
        let resolution = resolution();
        let mut session = Session::new(&resolution, CurrencyPair::new("USD", "NGN"));

        let SessionOutput::Show(output) = session.handle("lots") else {
            panic!("Expected output");
        };
        assert!(output.contains("0.00 NGN"));
        assert_eq!(session.handle("quit"), SessionOutput::Quit);
    }

    fn run_with_input(input: &str) -> String {
        let resolution = resolution();
        let mut output = Vec::new();
        run_session(
            &resolution,
            CurrencyPair::new("USD", "NGN"),
            input.as_bytes(),
            &mut output,
        )
        .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_session_ends_at_end_of_input() {
        let output = run_with_input("1,000\nswap\n");

        assert!(output.contains("1,476,300.00 NGN"));
        assert!(output.contains("NGN → USD > "));
        assert_eq!(output.matches("Recipient gets").count(), 2);
    }

    #[test]
    fn test_empty_input_shows_no_conversion() {
        let output = run_with_input("");

        assert!(output.contains("USD → NGN > "));
        assert!(!output.contains("Recipient gets"));
    }

    #[test]
    fn test_blank_lines_and_quit() {
        let output = run_with_input("\n   \n250\nquit\n1,000\n");

        assert_eq!(output.matches("Recipient gets").count(), 1);
        assert!(!output.contains("1,476,300.00 NGN"));
    }
}
