use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{FinancialStatement, TickerSymbol};

/// Sentinel shown for metadata the provider did not supply.
pub const NOT_AVAILABLE: &str = "N/A";

/// The three statements a company summary is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    Income,
    BalanceSheet,
    CashFlow,
}

impl StatementKind {
    pub const ALL: [Self; 3] = [Self::Income, Self::BalanceSheet, Self::CashFlow];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::BalanceSheet => "balance_sheet",
            Self::CashFlow => "cash_flow",
        }
    }
}

impl Display for StatementKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw statements as fetched, before completeness validation.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StatementSet {
    pub income: FinancialStatement,
    pub balance_sheet: FinancialStatement,
    pub cash_flow: FinancialStatement,
}

impl StatementSet {
    pub fn get(&self, kind: StatementKind) -> &FinancialStatement {
        match kind {
            StatementKind::Income => &self.income,
            StatementKind::BalanceSheet => &self.balance_sheet,
            StatementKind::CashFlow => &self.cash_flow,
        }
    }

    pub fn set(&mut self, kind: StatementKind, statement: FinancialStatement) {
        match kind {
            StatementKind::Income => self.income = statement,
            StatementKind::BalanceSheet => self.balance_sheet = statement,
            StatementKind::CashFlow => self.cash_flow = statement,
        }
    }

    /// Statement kinds whose tables carry no data, in canonical order.
    pub fn empty_kinds(&self) -> Vec<StatementKind> {
        StatementKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind).is_empty())
            .collect()
    }
}

/// Validated statement aggregate for one ticker.
///
/// Only [`crate::validate::validate_statements`] builds this type, so every
/// instance holds three non-empty statements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyData {
    ticker: TickerSymbol,
    statements: StatementSet,
}

impl CompanyData {
    pub(crate) fn from_validated(ticker: TickerSymbol, statements: StatementSet) -> Self {
        Self { ticker, statements }
    }

    pub fn ticker(&self) -> &TickerSymbol {
        &self.ticker
    }

    pub fn cash_flow(&self) -> &FinancialStatement {
        &self.statements.cash_flow
    }

    pub fn statement(&self, kind: StatementKind) -> &FinancialStatement {
        self.statements.get(kind)
    }
}

/// Provider-supplied descriptive fields; any of them may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompanyMetadata {
    pub name: Option<String>,
    pub sector: Option<String>,
    pub country: Option<String>,
    pub currency: Option<String>,
}

impl CompanyMetadata {
    pub fn name_or_na(&self) -> String {
        or_not_available(&self.name)
    }

    pub fn sector_or_na(&self) -> String {
        or_not_available(&self.sector)
    }

    pub fn country_or_na(&self) -> String {
        or_not_available(&self.country)
    }

    pub fn currency_or_na(&self) -> String {
        or_not_available(&self.currency)
    }
}

fn or_not_available(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_owned()
}
