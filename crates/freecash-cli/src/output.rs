use std::fmt::Write as _;

use freecash_core::{FcfSeries, FinancialStatement, NOT_AVAILABLE};

use crate::cli::OutputFormat;
use crate::commands::{Payload, StatementsData};
use crate::error::CliError;
use crate::metadata::Response;

const BILLION: f64 = 1_000_000_000.0;

pub fn render(
    response: &Response<Payload>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(response)?
            } else {
                serde_json::to_string(response)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => print!("{}", render_table(response)),
    }

    Ok(())
}

fn render_table(response: &Response<Payload>) -> String {
    let mut out = String::new();
    let meta = &response.meta;

    // Writing into a String cannot fail.
    let _ = writeln!(out, "request_id : {}", meta.request_id);
    let _ = writeln!(out, "provider   : {}", meta.provider);
    let _ = writeln!(out, "ticker     : {}", meta.ticker);
    let _ = writeln!(out, "latency_ms : {}", meta.latency_ms);
    if !meta.warnings.is_empty() {
        let _ = writeln!(out, "warnings:");
        for warning in &meta.warnings {
            let _ = writeln!(out, "  - {warning}");
        }
    }
    out.push('\n');

    match &response.data {
        Payload::Summary(record) => {
            let _ = writeln!(out, "name       : {}", record.name);
            let _ = writeln!(out, "sector     : {}", record.sector);
            let _ = writeln!(out, "country    : {}", record.country);
            let _ = writeln!(out, "currency   : {}", record.currency);
            match record.free_cash_flow.series() {
                Some(series) => push_fcf(&mut out, series, &record.currency),
                None => {
                    let error = record.free_cash_flow.error().unwrap_or(NOT_AVAILABLE);
                    let _ = writeln!(out, "free cash flow: {error}");
                }
            }
        }
        Payload::Statements(data) => push_statements(&mut out, data),
        Payload::Fcf(data) => push_fcf(&mut out, &data.free_cash_flow, "reported currency"),
    }

    out
}

fn push_fcf(out: &mut String, series: &FcfSeries, currency: &str) {
    let _ = writeln!(out, "free cash flow (billions, {currency}):");
    for point in series.points() {
        let value = point
            .value
            .map_or_else(|| String::from(NOT_AVAILABLE), |value| format!("{:.2}", value / BILLION));
        let _ = writeln!(out, "  {}  {value:>10}", point.period);
    }
}

fn push_statements(out: &mut String, data: &StatementsData) {
    for (index, entry) in data.statements.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "[{}]", entry.statement);
        push_statement_table(out, &entry.table);
    }
}

fn push_statement_table(out: &mut String, table: &FinancialStatement) {
    let label_width = table
        .labels()
        .map(str::len)
        .max()
        .unwrap_or(0)
        .max("line item".len());

    let _ = write!(out, "{:<label_width$}", "line item");
    for period in table.periods() {
        let _ = write!(out, "  {:>18}", period.to_string());
    }
    out.push('\n');

    for row in table.rows() {
        let _ = write!(out, "{:<label_width$}", row.label);
        for value in &row.values {
            let cell = value.map_or_else(|| String::from(NOT_AVAILABLE), format_cell);
            let _ = write!(out, "  {cell:>18}");
        }
        out.push('\n');
    }
}

fn format_cell(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
