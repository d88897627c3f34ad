//! Cash-flow row resolution by alias containment.
//!
//! Providers label the same line item differently ("Operating Cash Flow",
//! "Total Cash From Operating Activities", ...) and often append qualifiers.
//! A label matches a line item when its normalized form contains any alias of
//! that item.
//!
//! # Known limitation
//!
//! When several rows match the same line item, the last one in statement
//! order wins. A provider that ships two similar rows (for example a gross
//! and a net capex figure) may therefore resolve to the economically wrong
//! one; no attempt is made to rank candidates.

use std::fmt::{Display, Formatter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, PipelineError};
use crate::ValidationError;

/// Cash-flow line items required for free cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItem {
    OperatingCashFlow,
    CapitalExpenditure,
}

impl LineItem {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OperatingCashFlow => "operating cash flow",
            Self::CapitalExpenditure => "capital expenditure",
        }
    }
}

impl Display for LineItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recognised alias sets per line item.
///
/// Aliases are stored normalized (trimmed, lower-cased). Custom tables can be
/// loaded from JSON:
///
/// ```json
/// {
///   "operating_cash_flow": ["operating cash flow"],
///   "capital_expenditure": ["capital expenditure", "purchase of ppe"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasTable {
    operating_cash_flow: Vec<String>,
    capital_expenditure: Vec<String>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self {
            operating_cash_flow: to_owned_aliases(&[
                "total cash from operating activities",
                "operating cash flow",
            ]),
            capital_expenditure: to_owned_aliases(&[
                "capital expenditures",
                "capital expenditure",
                "purchase of fixed assets",
                "purchase of property and equipment",
                "investments in property, plant and equipment",
            ]),
        }
    }
}

impl AliasTable {
    /// Builds a table from raw aliases, normalizing each one.
    pub fn new<O, C>(operating_cash_flow: O, capital_expenditure: C) -> Result<Self, ValidationError>
    where
        O: IntoIterator,
        O::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        Ok(Self {
            operating_cash_flow: normalize_aliases(LineItem::OperatingCashFlow, operating_cash_flow)?,
            capital_expenditure: normalize_aliases(LineItem::CapitalExpenditure, capital_expenditure)?,
        })
    }

    /// Loads a JSON alias table from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;

        Self::from_json(&raw).map_err(|error| match error {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: display,
                source,
            },
            other => other,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let parsed: Self = serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
            path: String::from("<inline>"),
            source,
        })?;

        Ok(Self::new(parsed.operating_cash_flow, parsed.capital_expenditure)?)
    }

    pub fn aliases(&self, item: LineItem) -> &[String] {
        match item {
            LineItem::OperatingCashFlow => &self.operating_cash_flow,
            LineItem::CapitalExpenditure => &self.capital_expenditure,
        }
    }

    fn matches(&self, item: LineItem, normalized_label: &str) -> bool {
        self.aliases(item)
            .iter()
            .any(|alias| normalized_label.contains(alias.as_str()))
    }
}

/// Row positions of the two line items within a statement's row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRows {
    pub operating_cash_flow: usize,
    pub capital_expenditure: usize,
}

/// Trims surrounding whitespace and lower-cases a provider label.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Locates the operating-cash-flow and capital-expenditure rows.
///
/// Every label is tested against both alias sets, so one row may resolve
/// both items. Later matches overwrite earlier ones.
///
/// # Errors
///
/// [`PipelineError::RowNotFound`] naming the first missing item, operating
/// cash flow checked before capital expenditure.
pub fn resolve_rows<'a, I>(labels: I, aliases: &AliasTable) -> Result<ResolvedRows, PipelineError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut operating_cash_flow = None;
    let mut capital_expenditure = None;

    for (index, label) in labels.into_iter().enumerate() {
        let normalized = normalize_label(label);
        if aliases.matches(LineItem::OperatingCashFlow, &normalized) {
            operating_cash_flow = Some(index);
        }
        if aliases.matches(LineItem::CapitalExpenditure, &normalized) {
            capital_expenditure = Some(index);
        }
    }

    let operating_cash_flow =
        operating_cash_flow.ok_or(PipelineError::RowNotFound(LineItem::OperatingCashFlow))?;
    let capital_expenditure =
        capital_expenditure.ok_or(PipelineError::RowNotFound(LineItem::CapitalExpenditure))?;

    debug!(operating_cash_flow, capital_expenditure, "resolved cash flow rows");

    Ok(ResolvedRows {
        operating_cash_flow,
        capital_expenditure,
    })
}

fn to_owned_aliases(aliases: &[&str]) -> Vec<String> {
    aliases.iter().map(|alias| (*alias).to_owned()).collect()
}

fn normalize_aliases<I>(item: LineItem, aliases: I) -> Result<Vec<String>, ValidationError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let normalized = aliases
        .into_iter()
        .map(|alias| normalize_label(alias.as_ref()))
        .collect::<Vec<_>>();

    if normalized.is_empty() {
        return Err(ValidationError::EmptyAliasSet { item });
    }
    if normalized.iter().any(String::is_empty) {
        return Err(ValidationError::EmptyAlias { item });
    }

    Ok(normalized)
}
