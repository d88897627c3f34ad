mod fcf;
mod statements;
mod summary;

use std::sync::Arc;
use std::time::Instant;

use freecash_core::{
    AliasTable, ClientConfig, DataSource, FcfSeries, FinancialStatement, FixtureProvider,
    ProviderClient, StatementKind, SummaryAssembler, SummaryRecord, TickerSymbol, YahooAdapter,
};
use serde::Serialize;
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::metadata::{Response, ResponseMeta};

/// Command payload written under `data`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Summary(SummaryRecord),
    Statements(StatementsData),
    Fcf(FcfData),
}

#[derive(Debug, Clone, Serialize)]
pub struct StatementsData {
    pub ticker: TickerSymbol,
    pub statements: Vec<StatementEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatementEntry {
    pub statement: StatementKind,
    #[serde(flatten)]
    pub table: FinancialStatement,
}

#[derive(Debug, Clone, Serialize)]
pub struct FcfData {
    pub ticker: TickerSymbol,
    pub free_cash_flow: FcfSeries,
}

pub struct CommandResult {
    pub ticker: TickerSymbol,
    pub payload: Payload,
    pub warnings: Vec<String>,
}

impl CommandResult {
    pub fn ok(ticker: TickerSymbol, payload: Payload) -> Self {
        Self {
            ticker,
            payload,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

pub async fn run(cli: &Cli) -> Result<Response<Payload>, CliError> {
    let assembler = build_assembler(cli)?;
    let started = Instant::now();

    let result = match &cli.command {
        Command::Summary(args) => summary::run(args, &assembler).await?,
        Command::Statements(args) => statements::run(args, &assembler).await?,
        Command::Fcf(args) => fcf::run(args, &assembler).await?,
    };

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let mut meta = ResponseMeta::new(assembler.provider_id(), result.ticker, latency_ms);
    for warning in result.warnings {
        meta.push_warning(warning);
    }

    Ok(Response {
        meta,
        data: result.payload,
    })
}

fn build_assembler(cli: &Cli) -> Result<SummaryAssembler, CliError> {
    let aliases = match &cli.aliases {
        Some(path) => {
            debug!(path = %path.display(), "loading alias table");
            AliasTable::from_path(path)?
        }
        None => AliasTable::default(),
    };

    let source: Arc<dyn DataSource> = if cli.mock {
        Arc::new(FixtureProvider::default())
    } else {
        let mut config = ClientConfig::from_env();
        if let Some(timeout_ms) = cli.timeout_ms {
            config = config.with_timeout_ms(timeout_ms);
        }
        Arc::new(YahooAdapter::new(&config).map_err(CliError::Setup)?)
    };

    Ok(SummaryAssembler::new(ProviderClient::new(source), aliases))
}
