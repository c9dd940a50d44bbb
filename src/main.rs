use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use feecalc::core::FeeTier;
use feecalc::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for feecalc::AppCommand {
    fn from(cmd: Commands) -> feecalc::AppCommand {
        match cmd {
            Commands::Convert {
                amount,
                from,
                to,
                swap,
            } => feecalc::AppCommand::Convert {
                amount,
                from,
                to,
                swap,
            },
            Commands::Fees { tier } => feecalc::AppCommand::Fees { tier },
            Commands::Rates => feecalc::AppCommand::Rates,
            Commands::Interactive => feecalc::AppCommand::Interactive,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount and show the fee charged
    Convert {
        /// Amount to send, thousands separators allowed (e.g. 1,000)
        amount: String,
        /// Currency to send
        #[arg(long)]
        from: Option<String>,
        /// Currency the recipient gets
        #[arg(long)]
        to: Option<String>,
        /// Swap the send and receive currencies
        #[arg(long)]
        swap: bool,
    },
    /// Display service fees by tier
    Fees {
        /// Only show one tier: standard, premium or business
        #[arg(long)]
        tier: Option<FeeTier>,
    },
    /// Display the exchange rate table
    Rates,
    /// Convert amounts interactively
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => feecalc::cli::setup::setup(),
        Some(cmd) => feecalc::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
