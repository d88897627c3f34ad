//! Summary assembly: company metadata plus the derived FCF series.

use serde::Serialize;
use tracing::{info, warn};

use crate::client::ProviderClient;
use crate::error::PipelineError;
use crate::fcf::{compute_fcf, FcfSeries};
use crate::resolver::AliasTable;
use crate::{CompanyData, CompanyMetadata, ProviderId, TickerSymbol};

/// Free cash flow outcome carried by a summary.
///
/// Serializes as the series itself or as the error description string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FcfOutcome {
    Series(FcfSeries),
    Unavailable(String),
}

impl FcfOutcome {
    pub fn series(&self) -> Option<&FcfSeries> {
        match self {
            Self::Series(series) => Some(series),
            Self::Unavailable(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Series(_) => None,
            Self::Unavailable(description) => Some(description),
        }
    }
}

/// Presentation-ready record, built fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRecord {
    pub ticker: TickerSymbol,
    pub name: String,
    pub sector: String,
    pub country: String,
    pub currency: String,
    pub free_cash_flow: FcfOutcome,
}

/// Combines metadata with an FCF result, downgrading an FCF failure to a
/// description that names the ticker.
pub fn assemble_summary(
    ticker: &TickerSymbol,
    metadata: &CompanyMetadata,
    fcf: Result<FcfSeries, PipelineError>,
) -> SummaryRecord {
    let free_cash_flow = match fcf {
        Ok(series) => FcfOutcome::Series(series),
        Err(error) => {
            warn!(ticker = %ticker, code = error.code(), "free cash flow unavailable: {error}");
            FcfOutcome::Unavailable(format!(
                "failed to compute free cash flow for {ticker}: {error}"
            ))
        }
    };

    SummaryRecord {
        ticker: ticker.clone(),
        name: metadata.name_or_na(),
        sector: metadata.sector_or_na(),
        country: metadata.country_or_na(),
        currency: metadata.currency_or_na(),
        free_cash_flow,
    }
}

/// Entry point for the two inbound operations: summary and raw company data.
#[derive(Clone)]
pub struct SummaryAssembler {
    client: ProviderClient,
    aliases: AliasTable,
}

impl SummaryAssembler {
    pub fn new(client: ProviderClient, aliases: AliasTable) -> Self {
        Self { client, aliases }
    }

    pub fn provider_id(&self) -> ProviderId {
        self.client.provider_id()
    }

    /// Fetches, validates, derives FCF and assembles a summary.
    ///
    /// # Errors
    ///
    /// [`PipelineError::DataUnavailable`] or [`PipelineError::Provider`] when
    /// statements or metadata cannot be fetched. A missing cash-flow line item
    /// never fails this call; it is reported inside the record instead.
    pub async fn build_summary(&self, ticker: &TickerSymbol) -> Result<SummaryRecord, PipelineError> {
        let data = self.client.fetch_company_data(ticker).await?;
        let metadata = self.client.fetch_metadata(ticker).await?;

        let fcf = compute_fcf(data.cash_flow(), &self.aliases);
        let record = assemble_summary(ticker, &metadata, fcf);

        info!(
            ticker = %ticker,
            provider = %self.provider_id(),
            periods = record.free_cash_flow.series().map_or(0, FcfSeries::len),
            fcf_available = record.free_cash_flow.series().is_some(),
            "summary assembled"
        );

        Ok(record)
    }

    /// Returns the validated statements without deriving anything.
    ///
    /// # Errors
    ///
    /// Same as [`ProviderClient::fetch_company_data`].
    pub async fn company_data(&self, ticker: &TickerSymbol) -> Result<CompanyData, PipelineError> {
        self.client.fetch_company_data(ticker).await
    }

    /// Fetches statements and derives the FCF series alone.
    ///
    /// Unlike [`build_summary`](Self::build_summary) a missing line item is an
    /// error here.
    ///
    /// # Errors
    ///
    /// Fetch errors as for [`company_data`](Self::company_data), plus
    /// [`PipelineError::RowNotFound`].
    pub async fn free_cash_flow(&self, ticker: &TickerSymbol) -> Result<FcfSeries, PipelineError> {
        let data = self.client.fetch_company_data(ticker).await?;
        compute_fcf(data.cash_flow(), &self.aliases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::LineItem;
    use crate::NOT_AVAILABLE;

    #[test]
    fn fcf_failure_becomes_description_with_ticker() {
        let ticker = TickerSymbol::parse("NFLX").expect("valid");
        let metadata = CompanyMetadata {
            name: Some(String::from("Netflix, Inc.")),
            ..CompanyMetadata::default()
        };

        let record = assemble_summary(
            &ticker,
            &metadata,
            Err(PipelineError::RowNotFound(LineItem::CapitalExpenditure)),
        );

        assert_eq!(record.name, "Netflix, Inc.");
        assert_eq!(record.sector, NOT_AVAILABLE);
        assert_eq!(
            record.free_cash_flow.error(),
            Some("failed to compute free cash flow for NFLX: row not found: capital expenditure")
        );
    }

    #[test]
    fn outcome_serializes_untagged() {
        let unavailable = FcfOutcome::Unavailable(String::from("no capex row"));
        assert_eq!(
            serde_json::to_value(&unavailable).expect("serializes"),
            serde_json::json!("no capex row")
        );

        let empty = FcfOutcome::Series(FcfSeries::default());
        assert_eq!(
            serde_json::to_value(&empty).expect("serializes"),
            serde_json::json!([])
        );
    }
}
