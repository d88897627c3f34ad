//! CLI argument definitions for freecash.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `summary` | Company metadata plus free cash flow per period |
//! | `statements` | Raw income, balance sheet and cash-flow tables |
//! | `fcf` | Free cash flow series only |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--timeout-ms` | `FREECASH_TIMEOUT_MS` or `10000` | Per-request HTTP timeout |
//! | `--aliases` | built-in | JSON alias table for row resolution |
//! | `--mock` | `false` | Serve bundled fixture data instead of Yahoo |
//! | `-v` | warn | Raise log verbosity (repeatable) |
//!
//! # Examples
//!
//! ```bash
//! freecash summary AAPL --pretty
//! freecash statements MSFT --statement cash-flow --format table
//! freecash fcf AAPL --mock
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use freecash_core::StatementKind;

/// Free cash flow from public company statements.
#[derive(Debug, Parser)]
#[command(
    name = "freecash",
    author,
    version,
    about = "Free cash flow from public company statements"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Per-request timeout in milliseconds; overrides FREECASH_TIMEOUT_MS.
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    /// JSON file with custom operating cash flow and capex aliases.
    #[arg(long, global = true, value_name = "PATH")]
    pub aliases: Option<PathBuf>,

    /// Use bundled fixture data (AAPL, MSFT) instead of Yahoo Finance.
    #[arg(long, global = true, default_value_t = false)]
    pub mock: bool,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object output.
    Json,
    /// Human-readable layout for terminal display.
    Table,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Company name, sector, country, currency and free cash flow.
    ///
    /// A missing cash-flow line item does not fail this command; the free
    /// cash flow field carries the error description instead.
    Summary(TickerArgs),

    /// Validated raw statements as reported by the provider.
    Statements(StatementsArgs),

    /// Free cash flow per period (operating cash flow plus capex).
    Fcf(TickerArgs),
}

#[derive(Debug, Clone, Args)]
pub struct TickerArgs {
    /// Ticker symbol, e.g. AAPL.
    pub ticker: String,
}

#[derive(Debug, Clone, Args)]
pub struct StatementsArgs {
    /// Ticker symbol, e.g. AAPL.
    pub ticker: String,

    /// Print a single statement instead of all three.
    #[arg(long, value_enum)]
    pub statement: Option<StatementSelector>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatementSelector {
    Income,
    BalanceSheet,
    CashFlow,
}

impl From<StatementSelector> for StatementKind {
    fn from(value: StatementSelector) -> Self {
        match value {
            StatementSelector::Income => Self::Income,
            StatementSelector::BalanceSheet => Self::BalanceSheet,
            StatementSelector::CashFlow => Self::CashFlow,
        }
    }
}
