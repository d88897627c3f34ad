use freecash_core::{StatementKind, SummaryAssembler, TickerSymbol};

use crate::cli::StatementsArgs;
use crate::error::CliError;

use super::{CommandResult, Payload, StatementEntry, StatementsData};

pub async fn run(
    args: &StatementsArgs,
    assembler: &SummaryAssembler,
) -> Result<CommandResult, CliError> {
    let ticker = TickerSymbol::parse(&args.ticker)?;
    let data = assembler.company_data(&ticker).await?;

    let kinds = match args.statement {
        Some(selected) => vec![StatementKind::from(selected)],
        None => StatementKind::ALL.to_vec(),
    };
    let statements = kinds
        .into_iter()
        .map(|kind| StatementEntry {
            statement: kind,
            table: data.statement(kind).clone(),
        })
        .collect();

    Ok(CommandResult::ok(
        ticker.clone(),
        Payload::Statements(StatementsData { ticker, statements }),
    ))
}
