//! Properties of free cash flow derivation and row resolution that must hold
//! for any statement shape.

use freecash_core::{
    compute_fcf, resolve_rows, AliasTable, FinancialStatement, LineItem, Period, PipelineError,
    StatementRow,
};

fn periods(count: usize) -> Vec<Period> {
    (0..count)
        .map(|offset| {
            Period::parse(&format!("{}-12-31", 2010 + offset)).expect("valid period")
        })
        .collect()
}

/// Deterministic value generator; `None` roughly one cell in five.
fn cell(seed: usize) -> Option<f64> {
    let mixed = seed.wrapping_mul(2_654_435_761) % 1_000;
    (mixed % 5 != 0).then(|| mixed as f64 * 1_000.0 - 250_000.0)
}

#[test]
fn fcf_has_one_point_per_period_in_source_order() {
    for count in 1..=12 {
        // Given: A statement with `count` periods in descending order
        let mut columns = periods(count);
        columns.reverse();
        let statement = FinancialStatement::new(
            columns.clone(),
            vec![
                StatementRow::new("Operating Cash Flow", (0..count).map(cell).collect()),
                StatementRow::new("Capital Expenditure", (0..count).map(|i| cell(i + 97)).collect()),
            ],
        )
        .expect("valid statement");

        // When: FCF is derived
        let series = compute_fcf(&statement, &AliasTable::default()).expect("fcf computes");

        // Then: Periods line up exactly with the source columns
        let derived = series.points().iter().map(|point| point.period).collect::<Vec<_>>();
        assert_eq!(derived, columns);
    }
}

#[test]
fn fcf_is_sum_when_both_present_and_missing_otherwise() {
    let count = 40;
    let ocf = (0..count).map(cell).collect::<Vec<_>>();
    let capex = (0..count).map(|i| cell(i * 7 + 3)).collect::<Vec<_>>();
    let statement = FinancialStatement::new(
        periods(count),
        vec![
            StatementRow::new("Net Income", vec![Some(1.0); count]),
            StatementRow::new("Operating Cash Flow", ocf.clone()),
            StatementRow::new("Capital Expenditure", capex.clone()),
        ],
    )
    .expect("valid statement");

    let series = compute_fcf(&statement, &AliasTable::default()).expect("fcf computes");

    for (index, point) in series.points().iter().enumerate() {
        let expected = match (ocf[index], capex[index]) {
            (Some(ocf), Some(capex)) => Some(ocf + capex),
            _ => None,
        };
        assert_eq!(point.value, expected, "period {}", point.period);
    }
}

#[test]
fn zero_is_a_value_not_a_gap() {
    let statement = FinancialStatement::new(
        periods(1),
        vec![
            StatementRow::new("Operating Cash Flow", vec![Some(0.0)]),
            StatementRow::new("Capital Expenditure", vec![Some(0.0)]),
        ],
    )
    .expect("valid statement");

    let series = compute_fcf(&statement, &AliasTable::default()).expect("fcf computes");
    assert_eq!(series.points()[0].value, Some(0.0));
}

#[test]
fn resolution_ignores_case_and_surrounding_whitespace() {
    for (ocf, capex) in [
        ("operating cash flow", "capital expenditure"),
        ("OPERATING CASH FLOW", "CAPITAL EXPENDITURES"),
        ("\tOperating Cash Flow\n", "  Purchase Of Fixed Assets  "),
    ] {
        let resolved =
            resolve_rows([ocf, capex], &AliasTable::default()).expect("rows resolve");
        assert_eq!(resolved.operating_cash_flow, 0, "{ocf:?}");
        assert_eq!(resolved.capital_expenditure, 1, "{capex:?}");
    }
}

#[test]
fn last_of_several_matching_rows_is_used() {
    // Given: Two capex candidates, the gross figure listed last
    let statement = FinancialStatement::new(
        periods(1),
        vec![
            StatementRow::new("Operating Cash Flow", vec![Some(100.0)]),
            StatementRow::new("Capital Expenditure, Net", vec![Some(-10.0)]),
            StatementRow::new("Capital Expenditure, Gross", vec![Some(-25.0)]),
        ],
    )
    .expect("valid statement");

    // When: FCF is derived
    let series = compute_fcf(&statement, &AliasTable::default()).expect("fcf computes");

    // Then: The later row wins
    assert_eq!(series.points()[0].value, Some(75.0));
}

#[test]
fn rows_without_any_alias_match_are_reported_in_fixed_order() {
    let neither = ["Net Income", "Depreciation"];
    assert_eq!(
        resolve_rows(neither, &AliasTable::default()),
        Err(PipelineError::RowNotFound(LineItem::OperatingCashFlow))
    );

    let only_capex = ["Net Income", "Capital Expenditure"];
    assert_eq!(
        resolve_rows(only_capex, &AliasTable::default()),
        Err(PipelineError::RowNotFound(LineItem::OperatingCashFlow))
    );

    let only_ocf = ["Operating Cash Flow", "Net Income"];
    assert_eq!(
        resolve_rows(only_ocf, &AliasTable::default()),
        Err(PipelineError::RowNotFound(LineItem::CapitalExpenditure))
    );
}

#[test]
fn empty_statement_resolves_nothing() {
    let error = compute_fcf(&FinancialStatement::empty(), &AliasTable::default())
        .expect_err("no rows to resolve");
    assert_eq!(error, PipelineError::RowNotFound(LineItem::OperatingCashFlow));
}
