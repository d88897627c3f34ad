//! Free cash flow derivation from a cash-flow statement.

use serde::Serialize;

use crate::error::PipelineError;
use crate::resolver::{resolve_rows, AliasTable};
use crate::{FinancialStatement, Period};

/// Free cash flow for one reporting period; `None` when either input cell
/// was missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FcfPoint {
    pub period: Period,
    pub value: Option<f64>,
}

/// Free cash flow per period, in the source statement's period order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct FcfSeries {
    points: Vec<FcfPoint>,
}

impl FcfSeries {
    pub fn points(&self) -> &[FcfPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, period: Period) -> Option<f64> {
        self.points
            .iter()
            .find(|point| point.period == period)
            .and_then(|point| point.value)
    }
}

impl FromIterator<FcfPoint> for FcfSeries {
    fn from_iter<T: IntoIterator<Item = FcfPoint>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// Computes operating cash flow plus capital expenditure for every period.
///
/// Capital expenditure is expected to carry its negative sign already, so the
/// rows are added. Missing cells are never treated as zero.
///
/// # Errors
///
/// Propagates [`PipelineError::RowNotFound`] from [`resolve_rows`].
pub fn compute_fcf(
    statement: &FinancialStatement,
    aliases: &AliasTable,
) -> Result<FcfSeries, PipelineError> {
    let resolved = resolve_rows(statement.labels(), aliases)?;
    let rows = statement.rows();
    let operating = &rows[resolved.operating_cash_flow].values;
    let capex = &rows[resolved.capital_expenditure].values;

    Ok(statement
        .periods()
        .iter()
        .enumerate()
        .map(|(column, period)| FcfPoint {
            period: *period,
            value: match (operating[column], capex[column]) {
                (Some(ocf), Some(capex)) => Some(ocf + capex),
                _ => None,
            },
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::LineItem;
    use crate::StatementRow;

    fn period(value: &str) -> Period {
        Period::parse(value).expect("valid period")
    }

    #[test]
    fn adds_signed_capex_to_operating_cash_flow() {
        let statement = FinancialStatement::new(
            vec![period("2023-12-31"), period("2024-12-31")],
            vec![
                StatementRow::new("Total Cash From Operating Activities", vec![Some(100.0), Some(120.0)]),
                StatementRow::new("Capital Expenditures", vec![Some(-30.0), Some(-40.0)]),
            ],
        )
        .expect("valid statement");

        let series = compute_fcf(&statement, &AliasTable::default()).expect("fcf computes");

        assert_eq!(series.len(), 2);
        assert_eq!(series.get(period("2023-12-31")), Some(70.0));
        assert_eq!(series.get(period("2024-12-31")), Some(80.0));
    }

    #[test]
    fn missing_cells_stay_missing() {
        let statement = FinancialStatement::new(
            vec![period("2024-12-31"), period("2023-12-31"), period("2022-12-31")],
            vec![
                StatementRow::new("Operating Cash Flow", vec![Some(10.0), None, Some(8.0)]),
                StatementRow::new("Capital Expenditure", vec![None, Some(-2.0), Some(-3.0)]),
            ],
        )
        .expect("valid statement");

        let series = compute_fcf(&statement, &AliasTable::default()).expect("fcf computes");
        let values = series.points().iter().map(|point| point.value).collect::<Vec<_>>();

        assert_eq!(values, vec![None, None, Some(5.0)]);
    }

    #[test]
    fn keeps_source_period_order() {
        let periods = vec![period("2024-12-31"), period("2022-12-31"), period("2023-12-31")];
        let statement = FinancialStatement::new(
            periods.clone(),
            vec![
                StatementRow::new("Operating Cash Flow", vec![Some(3.0), Some(1.0), Some(2.0)]),
                StatementRow::new("Capital Expenditure", vec![Some(0.0), Some(0.0), Some(0.0)]),
            ],
        )
        .expect("valid statement");

        let series = compute_fcf(&statement, &AliasTable::default()).expect("fcf computes");
        let ordered = series.points().iter().map(|point| point.period).collect::<Vec<_>>();

        assert_eq!(ordered, periods);
    }

    #[test]
    fn propagates_row_not_found() {
        let statement = FinancialStatement::new(
            vec![period("2024-12-31")],
            vec![StatementRow::new("Operating Cash Flow", vec![Some(1.0)])],
        )
        .expect("valid statement");

        let err = compute_fcf(&statement, &AliasTable::default()).expect_err("must fail");
        assert_eq!(err, PipelineError::RowNotFound(LineItem::CapitalExpenditure));
    }
}
