//! Data source trait and provider-level error types.
//!
//! This module defines the adapter contract (`DataSource`) every statement
//! provider implements. Adapters only translate provider payloads into
//! [`FinancialStatement`] and [`CompanyMetadata`]; completeness checks and
//! error policy live in [`crate::client`] and [`crate::validate`].
//!
//! # Endpoints
//!
//! | Method | Response | Description |
//! |--------|----------|-------------|
//! | [`statement`](DataSource::statement) | [`FinancialStatement`] | One statement table for a ticker |
//! | [`metadata`](DataSource::metadata) | [`CompanyMetadata`] | Name, sector, country, currency |
//!
//! # Example
//!
//! ```rust,ignore
//! use freecash_core::{DataSource, FixtureProvider, StatementKind, TickerSymbol};
//!
//! async fn cash_flow_rows(source: &FixtureProvider) -> Result<(), freecash_core::SourceError> {
//!     let ticker = TickerSymbol::parse("AAPL").expect("valid ticker");
//!     let statement = source.statement(&ticker, StatementKind::CashFlow).await?;
//!
//!     for label in statement.labels() {
//!         println!("{label}");
//!     }
//!
//!     Ok(())
//! }
//! ```

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{CompanyMetadata, FinancialStatement, ProviderId, StatementKind, TickerSymbol};

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    NotFound,
    Unavailable,
    RateLimited,
    InvalidRequest,
    Internal,
}

/// Structured error raised by provider adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::NotFound,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether a later attempt might succeed. Informational only; nothing in
    /// the pipeline retries.
    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::NotFound => "source.not_found",
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Boxed future returned by [`DataSource`] methods.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Statement provider contract.
///
/// Implementations are stateless across calls: each invocation issues its own
/// upstream requests and returns owned data.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so one adapter can serve callers on
/// different threads.
pub trait DataSource: Send + Sync {
    /// Returns the unique provider identifier.
    fn id(&self) -> ProviderId;

    /// Fetches one statement table for `ticker`.
    ///
    /// An unknown ticker should produce an empty table rather than an error
    /// when the provider cannot distinguish the two.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on transport failures, rate limiting, or
    /// malformed provider payloads.
    fn statement<'a>(
        &'a self,
        ticker: &'a TickerSymbol,
        kind: StatementKind,
    ) -> SourceFuture<'a, FinancialStatement>;

    /// Fetches descriptive metadata for `ticker`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] with [`SourceErrorKind::NotFound`] when the
    /// provider reports the ticker does not exist, or another kind on
    /// transport and payload failures.
    fn metadata<'a>(&'a self, ticker: &'a TickerSymbol) -> SourceFuture<'a, CompanyMetadata>;
}
