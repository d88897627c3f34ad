use freecash_core::{PipelineError, SummaryAssembler, TickerSymbol};

use crate::cli::TickerArgs;
use crate::error::CliError;

use super::{CommandResult, FcfData, Payload};

pub async fn run(args: &TickerArgs, assembler: &SummaryAssembler) -> Result<CommandResult, CliError> {
    let ticker = TickerSymbol::parse(&args.ticker)?;

    let free_cash_flow = assembler
        .free_cash_flow(&ticker)
        .await
        .map_err(|error| match error {
            PipelineError::RowNotFound(_) => CliError::FreeCashFlow {
                ticker: ticker.clone(),
                source: error,
            },
            other => CliError::Pipeline(other),
        })?;

    let warning = free_cash_flow
        .points()
        .iter()
        .any(|point| point.value.is_none())
        .then(|| String::from("some periods lack operating cash flow or capex values"));

    let result = CommandResult::ok(
        ticker.clone(),
        Payload::Fcf(FcfData {
            ticker,
            free_cash_flow,
        }),
    );
    Ok(match warning {
        Some(warning) => result.with_warning(warning),
        None => result,
    })
}
