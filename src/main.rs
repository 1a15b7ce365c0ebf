use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cmd::batch::BatchCommand;
use crate::cmd::quote::QuoteCommand;
use crate::cmd::rates::RatesCommand;
use crate::cmd::schema::SchemaCommand;
use crate::core::RateConfig;

mod cmd;
mod core;

#[derive(Parser, Debug)]
#[command(name = "htcalc", version, about = "WA heavy trailer (HT class) on-road cost calculator")]
struct Cli {
    /// JSON rate file overriding the shipped rates
    #[arg(long, global = true, env = "HTCALC_RATES")]
    rates: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate the on-road cost of one trailer
    Quote(QuoteCommand),
    /// Quote every row of a CSV file, writing CSV to stdout
    Batch(BatchCommand),
    /// Show the rates in effect
    Rates(RatesCommand),
    /// Print the rate file schema or batch CSV columns
    Schema(SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Command::Quote(cmd) => cmd.exec(&load_rates(&cli)?),
        Command::Batch(cmd) => cmd.exec(&load_rates(&cli)?),
        Command::Rates(cmd) => cmd.exec(&load_rates(&cli)?),
        Command::Schema(cmd) => cmd.exec(),
    }
}

fn load_rates(cli: &Cli) -> anyhow::Result<RateConfig> {
    Ok(RateConfig::load_or_default(cli.rates.as_deref())?)
}
