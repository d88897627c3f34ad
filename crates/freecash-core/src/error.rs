use thiserror::Error;

use crate::data_source::SourceError;
use crate::resolver::LineItem;
use crate::{Period, TickerSymbol};

/// Validation and contract errors exposed by `freecash-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker symbol cannot be empty")]
    EmptySymbol,

    #[error("invalid period '{value}', expected YYYY-MM-DD")]
    InvalidPeriod { value: String },
    #[error("period {period} appears more than once")]
    DuplicatePeriod { period: Period },
    #[error("row '{label}' has {found} values but the statement has {expected} periods")]
    RaggedRow {
        label: String,
        expected: usize,
        found: usize,
    },

    #[error("alias set for {item} contains an empty alias")]
    EmptyAlias { item: LineItem },
    #[error("alias set for {item} must contain at least one alias")]
    EmptyAliasSet { item: LineItem },
}

/// Pipeline failures surfaced by the provider client, FCF calculator and
/// summary assembler.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("data unavailable for {ticker}: {cause}")]
    DataUnavailable { ticker: TickerSymbol, cause: String },

    #[error("row not found: {0}")]
    RowNotFound(LineItem),

    #[error("provider error for {ticker}: {source}")]
    Provider {
        ticker: TickerSymbol,
        #[source]
        source: SourceError,
    },
}

impl PipelineError {
    pub fn data_unavailable(ticker: &TickerSymbol, cause: impl Into<String>) -> Self {
        Self::DataUnavailable {
            ticker: ticker.clone(),
            cause: cause.into(),
        }
    }

    pub fn provider(ticker: &TickerSymbol, source: SourceError) -> Self {
        Self::Provider {
            ticker: ticker.clone(),
            source,
        }
    }

    /// Ticker named by the error, if the failure is tied to one.
    pub fn ticker(&self) -> Option<&TickerSymbol> {
        match self {
            Self::DataUnavailable { ticker, .. } | Self::Provider { ticker, .. } => Some(ticker),
            Self::RowNotFound(_) => None,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::DataUnavailable { .. } => "pipeline.data_unavailable",
            Self::RowNotFound(_) => "pipeline.row_not_found",
            Self::Provider { .. } => "pipeline.provider_error",
        }
    }
}

/// Errors raised while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
