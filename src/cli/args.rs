use crate::types::{ExchangeRate, LedgerError};
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Inspect a personal finance snapshot
#[derive(Parser, Debug)]
#[command(name = "finanza360")]
#[command(
    about = "Report net worth, pools, budgets and credit usage from a finance snapshot",
    long_about = None
)]
pub struct CliArgs {
    /// Snapshot JSON file holding the entity set
    #[arg(value_name = "SNAPSHOT", help = "Path to the snapshot JSON file")]
    pub snapshot: PathBuf,

    /// Month the flow and budget sections report on
    #[arg(
        long = "month",
        value_name = "YYYY-MM",
        help = "Month to report on (default: the latest month with recorded activity)"
    )]
    pub month: Option<String>,

    /// USD→VES exchange rate to normalize with
    #[arg(
        long = "rate",
        value_name = "RATE",
        help = "USD to VES exchange rate (default: 45.50)"
    )]
    pub rate: Option<Decimal>,

    /// What to print
    #[arg(
        long = "output",
        value_name = "MODE",
        default_value = "summary",
        help = "Output mode: 'summary' report or 'accounts-csv' export"
    )]
    pub output: OutputMode,
}

/// Available output modes
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-readable report of every derived view
    Summary,
    /// Account table as CSV on stdout
    AccountsCsv,
}

impl CliArgs {
    /// Resolve the exchange rate, falling back to the default
    ///
    /// An explicitly supplied non-positive rate is an error rather than a
    /// silent fallback.
    pub fn exchange_rate(&self) -> Result<ExchangeRate, LedgerError> {
        match self.rate {
            Some(rate) => ExchangeRate::new(rate),
            None => Ok(ExchangeRate::default()),
        }
    }
}
