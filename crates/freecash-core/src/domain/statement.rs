use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

use crate::ValidationError;

const PERIOD_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Reporting period key, the fiscal period end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period(Date);

impl Period {
    pub const fn new(date: Date) -> Self {
        Self(date)
    }

    /// Parse a `YYYY-MM-DD` period key.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input.trim(), PERIOD_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidPeriod {
                value: input.to_owned(),
            })
    }

    pub const fn year(self) -> i32 {
        self.0.year()
    }

    fn format(self) -> String {
        self.0
            .format(PERIOD_FORMAT)
            .unwrap_or_else(|_| self.0.to_string())
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format())
    }
}

impl Serialize for Period {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format())
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

/// One provider-labelled line item, with a value slot per statement period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementRow {
    pub label: String,
    pub values: Vec<Option<f64>>,
}

impl StatementRow {
    pub fn new(label: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// Provider statement table: rows are line items, columns are periods.
///
/// Labels are kept exactly as the provider sent them and period order is
/// whatever the provider used. Every row holds exactly one value slot per
/// period.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FinancialStatement {
    periods: Vec<Period>,
    rows: Vec<StatementRow>,
}

impl FinancialStatement {
    pub fn new(periods: Vec<Period>, rows: Vec<StatementRow>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::with_capacity(periods.len());
        if let Some(period) = periods.iter().find(|period| !seen.insert(**period)) {
            return Err(ValidationError::DuplicatePeriod { period: *period });
        }

        let expected = periods.len();
        if let Some(row) = rows.iter().find(|row| row.values.len() != expected) {
            return Err(ValidationError::RaggedRow {
                label: row.label.clone(),
                expected,
                found: row.values.len(),
            });
        }

        Ok(Self { periods, rows })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn rows(&self) -> &[StatementRow] {
        &self.rows
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.label.as_str())
    }

    /// A table with no periods or no rows carries no data.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty() || self.rows.is_empty()
    }

    /// Looks up a row by its exact provider label.
    pub fn row(&self, label: &str) -> Option<&StatementRow> {
        self.rows.iter().find(|row| row.label == label)
    }

    pub fn value(&self, label: &str, period: Period) -> Option<f64> {
        let column = self.periods.iter().position(|candidate| *candidate == period)?;
        self.row(label)?.values.get(column).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(value: &str) -> Period {
        Period::parse(value).expect("valid period")
    }

    #[test]
    fn period_round_trips_through_display() {
        let parsed = period("2024-09-28");
        assert_eq!(parsed.to_string(), "2024-09-28");
        assert_eq!(parsed.year(), 2024);
    }

    #[test]
    fn rejects_malformed_period() {
        let err = Period::parse("FY2024").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidPeriod { .. }));
    }

    #[test]
    fn rejects_rows_that_do_not_match_period_count() {
        let err = FinancialStatement::new(
            vec![period("2023-12-31"), period("2024-12-31")],
            vec![StatementRow::new("Operating Cash Flow", vec![Some(1.0)])],
        )
        .expect_err("must fail");

        assert_eq!(
            err,
            ValidationError::RaggedRow {
                label: String::from("Operating Cash Flow"),
                expected: 2,
                found: 1,
            }
        );
    }

    #[test]
    fn rejects_repeated_period_columns() {
        let err = FinancialStatement::new(
            vec![period("2024-12-31"), period("2023-12-31"), period("2024-12-31")],
            vec![StatementRow::new("Operating Cash Flow", vec![Some(1.0), Some(2.0), Some(3.0)])],
        )
        .expect_err("must fail");

        assert_eq!(
            err,
            ValidationError::DuplicatePeriod {
                period: period("2024-12-31"),
            }
        );
        assert_eq!(err.to_string(), "period 2024-12-31 appears more than once");
    }

    #[test]
    fn table_without_rows_or_periods_is_empty() {
        assert!(FinancialStatement::empty().is_empty());

        let no_rows = FinancialStatement::new(vec![period("2024-12-31")], Vec::new())
            .expect("valid statement");
        assert!(no_rows.is_empty());
    }

    #[test]
    fn value_lookup_respects_missing_cells() {
        let statement = FinancialStatement::new(
            vec![period("2024-12-31"), period("2023-12-31")],
            vec![StatementRow::new("Net Income", vec![None, Some(5.0)])],
        )
        .expect("valid statement");

        assert_eq!(statement.value("Net Income", period("2024-12-31")), None);
        assert_eq!(statement.value("Net Income", period("2023-12-31")), Some(5.0));
        assert_eq!(statement.value("Revenue", period("2023-12-31")), None);
    }
}
