use freecash_core::{ConfigError, PipelineError, SourceError, TickerSymbol, ValidationError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("failed to compute free cash flow for {ticker}: {source}")]
    FreeCashFlow {
        ticker: TickerSymbol,
        #[source]
        source: PipelineError,
    },

    #[error("failed to set up provider: {0}")]
    Setup(SourceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to initialise logging: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Pipeline(PipelineError::Provider { .. }) => 6,
            Self::Pipeline(_) | Self::FreeCashFlow { .. } => 3,
            Self::Serialization(_) => 4,
            Self::Setup(_) | Self::Config(_) | Self::Io(_) | Self::Logging(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freecash_core::LineItem;

    fn ticker() -> TickerSymbol {
        TickerSymbol::parse("AAPL").expect("valid")
    }

    #[test]
    fn pipeline_errors_map_to_distinct_exit_codes() {
        let unavailable = CliError::from(PipelineError::data_unavailable(&ticker(), "empty"));
        let provider = CliError::from(PipelineError::provider(
            &ticker(),
            SourceError::rate_limited("yahoo returned status 429"),
        ));

        assert_eq!(unavailable.exit_code(), 3);
        assert_eq!(provider.exit_code(), 6);
        assert_eq!(CliError::from(ValidationError::EmptySymbol).exit_code(), 2);
    }

    #[test]
    fn free_cash_flow_error_names_ticker() {
        let error = CliError::FreeCashFlow {
            ticker: ticker(),
            source: PipelineError::RowNotFound(LineItem::CapitalExpenditure),
        };

        assert_eq!(
            error.to_string(),
            "failed to compute free cash flow for AAPL: row not found: capital expenditure"
        );
        assert_eq!(error.exit_code(), 3);
    }
}
