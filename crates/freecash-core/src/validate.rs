//! Completeness check between raw provider statements and [`CompanyData`].

use crate::error::PipelineError;
use crate::{CompanyData, StatementSet, TickerSymbol};

/// Accepts the statement set only when all three tables carry data.
///
/// # Errors
///
/// [`PipelineError::DataUnavailable`] naming every empty statement.
pub fn validate_statements(
    ticker: &TickerSymbol,
    statements: StatementSet,
) -> Result<CompanyData, PipelineError> {
    let empty = statements.empty_kinds();
    if !empty.is_empty() {
        let names = empty
            .iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(PipelineError::data_unavailable(
            ticker,
            format!("empty financial statements: {names}"),
        ));
    }

    Ok(CompanyData::from_validated(ticker.clone(), statements))
}
