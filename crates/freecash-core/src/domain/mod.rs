//! # Domain Models
//!
//! Canonical types flowing through the statement pipeline.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TickerSymbol`] | Caller-supplied ticker, non-empty |
//! | [`Period`] | Reporting period end date |
//! | [`FinancialStatement`] | Provider table of labelled rows by period |
//! | [`StatementSet`] | The three raw statements before validation |
//! | [`CompanyData`] | Validated aggregate of three non-empty statements |
//! | [`CompanyMetadata`] | Optional name, sector, country and currency |
//!
//! Statements are kept exactly as the provider labelled them; the only
//! normalization happens inside the row resolver when labels are compared.

mod company;
mod statement;
mod symbol;

pub use company::{CompanyData, CompanyMetadata, StatementKind, StatementSet, NOT_AVAILABLE};
pub use statement::{FinancialStatement, Period, StatementRow};
pub use symbol::TickerSymbol;
