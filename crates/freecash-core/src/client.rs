//! Provider client: fetches statements and metadata through a [`DataSource`]
//! and maps adapter failures onto the pipeline error taxonomy.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::data_source::{DataSource, SourceError, SourceErrorKind};
use crate::error::PipelineError;
use crate::validate::validate_statements;
use crate::{CompanyData, CompanyMetadata, ProviderId, StatementKind, StatementSet, TickerSymbol};

/// Thin wrapper over one data source. Holds no state between calls.
#[derive(Clone)]
pub struct ProviderClient {
    source: Arc<dyn DataSource>,
}

impl ProviderClient {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self { source }
    }

    pub fn provider_id(&self) -> ProviderId {
        self.source.id()
    }

    /// Fetches the three statements one after another and validates them.
    ///
    /// No retries: the first failure is final for this call.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::DataUnavailable`] when the provider reports the
    ///   ticker as unknown or any statement comes back empty.
    /// - [`PipelineError::Provider`] for any other adapter failure.
    pub async fn fetch_company_data(
        &self,
        ticker: &TickerSymbol,
    ) -> Result<CompanyData, PipelineError> {
        let mut statements = StatementSet::default();

        for kind in StatementKind::ALL {
            debug!(
                ticker = %ticker,
                provider = %self.source.id(),
                statement = %kind,
                "fetching statement"
            );
            let statement = self
                .source
                .statement(ticker, kind)
                .await
                .map_err(|error| self.map_source_error(ticker, error))?;
            statements.set(kind, statement);
        }

        validate_statements(ticker, statements)
    }

    /// Fetches descriptive metadata; missing fields are not an error.
    ///
    /// # Errors
    ///
    /// Same mapping as [`fetch_company_data`](Self::fetch_company_data).
    pub async fn fetch_metadata(
        &self,
        ticker: &TickerSymbol,
    ) -> Result<CompanyMetadata, PipelineError> {
        debug!(ticker = %ticker, provider = %self.source.id(), "fetching metadata");
        self.source
            .metadata(ticker)
            .await
            .map_err(|error| self.map_source_error(ticker, error))
    }

    fn map_source_error(&self, ticker: &TickerSymbol, error: SourceError) -> PipelineError {
        warn!(
            ticker = %ticker,
            provider = %self.source.id(),
            code = error.code(),
            "provider call failed: {}",
            error.message()
        );

        match error.kind() {
            SourceErrorKind::NotFound => PipelineError::data_unavailable(ticker, error.message()),
            _ => PipelineError::provider(ticker, error),
        }
    }
}
