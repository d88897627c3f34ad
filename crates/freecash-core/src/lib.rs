//! Core contracts for freecash.
//!
//! This crate contains:
//! - Statement and metadata domain models with validation
//! - Provider identifiers, the data source trait and its adapters
//! - Row resolution and free cash flow derivation
//! - Summary assembly and the pipeline error taxonomy

pub mod adapters;
pub mod client;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod fcf;
pub mod http_client;
pub mod resolver;
pub mod source;
pub mod summary;
pub mod validate;

pub use adapters::{FixtureCompany, FixtureProvider, YahooAdapter};
pub use client::ProviderClient;
pub use config::{ClientConfig, DEFAULT_TIMEOUT_MS};
pub use data_source::{DataSource, SourceError, SourceErrorKind, SourceFuture};
pub use domain::{
    CompanyData, CompanyMetadata, FinancialStatement, Period, StatementKind, StatementRow,
    StatementSet, TickerSymbol, NOT_AVAILABLE,
};
pub use error::{ConfigError, PipelineError, ValidationError};
pub use fcf::{compute_fcf, FcfPoint, FcfSeries};
pub use http_client::{HttpAuth, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use resolver::{normalize_label, resolve_rows, AliasTable, LineItem, ResolvedRows};
pub use source::ProviderId;
pub use summary::{assemble_summary, FcfOutcome, SummaryAssembler, SummaryRecord};
pub use validate::validate_statements;
