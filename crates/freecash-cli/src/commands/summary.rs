use freecash_core::{SummaryAssembler, TickerSymbol};

use crate::cli::TickerArgs;
use crate::error::CliError;

use super::{CommandResult, Payload};

pub async fn run(args: &TickerArgs, assembler: &SummaryAssembler) -> Result<CommandResult, CliError> {
    let ticker = TickerSymbol::parse(&args.ticker)?;
    let record = assembler.build_summary(&ticker).await?;
    let warning = record.free_cash_flow.error().map(str::to_owned);

    let result = CommandResult::ok(ticker, Payload::Summary(record));
    Ok(match warning {
        Some(warning) => result.with_warning(warning),
        None => result,
    })
}
