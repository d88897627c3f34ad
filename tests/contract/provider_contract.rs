//! Contract every `DataSource` implementation must honour, checked against
//! the fixture provider and the Yahoo adapter over a scripted transport.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use freecash_core::{
    DataSource, FixtureProvider, HttpAuth, HttpClient, HttpError, HttpRequest, HttpResponse,
    ProviderId, StatementKind, TickerSymbol, YahooAdapter,
};

const KNOWN: &str = "AAPL";
const UNKNOWN: &str = "QQQQX";

/// Serves canned Yahoo payloads: full data for AAPL, empty series otherwise.
struct CannedYahoo;

impl HttpClient for CannedYahoo {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let known = request.url.contains(&format!("/{KNOWN}?"));
        let response = if request.url.contains("getcrumb") {
            HttpResponse::ok_json("crumb")
        } else if request.url.contains("quoteSummary") {
            HttpResponse::ok_json(if known {
                r#"{"quoteSummary":{"result":[{"price":{"longName":"Apple Inc.","currency":"USD"},"assetProfile":{"sector":"Technology","country":"United States"}}],"error":null}}"#
            } else {
                r#"{"quoteSummary":{"result":[{}],"error":null}}"#
            })
        } else if request.url.contains("timeseries") && known {
            HttpResponse::ok_json(
                r#"{"timeseries":{"result":[
                    {"meta":{"type":["annualOperatingCashFlow"]},"annualOperatingCashFlow":[{"asOfDate":"2024-09-30","reportedValue":{"raw":100.0}}]},
                    {"meta":{"type":["annualCapitalExpenditure"]},"annualCapitalExpenditure":[{"asOfDate":"2024-09-30","reportedValue":{"raw":-30.0}}]},
                    {"meta":{"type":["annualTotalRevenue"]},"annualTotalRevenue":[{"asOfDate":"2024-09-30","reportedValue":{"raw":500.0}}]},
                    {"meta":{"type":["annualTotalAssets"]},"annualTotalAssets":[{"asOfDate":"2024-09-30","reportedValue":{"raw":900.0}}]}
                ],"error":null}}"#,
            )
        } else if request.url.contains("timeseries") {
            HttpResponse::ok_json(r#"{"timeseries":{"result":[],"error":null}}"#)
        } else {
            HttpResponse::with_status(404, "")
        };

        Box::pin(async move { Ok(response) })
    }
}

fn provider_cases() -> Vec<(ProviderId, Arc<dyn DataSource>)> {
    vec![
        (ProviderId::Fixture, Arc::new(FixtureProvider::default())),
        (
            ProviderId::Yahoo,
            Arc::new(YahooAdapter::with_http_client(
                Arc::new(CannedYahoo),
                HttpAuth::Cookie(String::from("A3=contract")),
            )),
        ),
    ]
}

fn ticker(value: &str) -> TickerSymbol {
    TickerSymbol::parse(value).expect("valid ticker")
}

#[tokio::test]
async fn every_provider_reports_its_identifier() {
    for (id, source) in provider_cases() {
        assert_eq!(source.id(), id);
    }
}

#[tokio::test]
async fn known_ticker_yields_rectangular_non_empty_statements() {
    for (id, source) in provider_cases() {
        for kind in StatementKind::ALL {
            let statement = source
                .statement(&ticker(KNOWN), kind)
                .await
                .unwrap_or_else(|error| panic!("{id} {kind}: {error}"));

            assert!(!statement.is_empty(), "{id} {kind} should carry data");
            for row in statement.rows() {
                assert_eq!(
                    row.values.len(),
                    statement.periods().len(),
                    "{id} {kind} row '{}' is ragged",
                    row.label
                );
            }
        }
    }
}

#[tokio::test]
async fn cash_flow_statement_exposes_resolvable_rows() {
    for (id, source) in provider_cases() {
        let statement = source
            .statement(&ticker(KNOWN), StatementKind::CashFlow)
            .await
            .expect("cash flow statement");

        let series = freecash_core::compute_fcf(&statement, &Default::default())
            .unwrap_or_else(|error| panic!("{id}: {error}"));
        assert_eq!(series.len(), statement.periods().len(), "{id}");
    }
}

#[tokio::test]
async fn unknown_ticker_yields_empty_statements_not_errors() {
    for (id, source) in provider_cases() {
        for kind in StatementKind::ALL {
            let statement = source
                .statement(&ticker(UNKNOWN), kind)
                .await
                .unwrap_or_else(|error| panic!("{id} {kind}: {error}"));
            assert!(statement.is_empty(), "{id} {kind} should be empty");
        }
    }
}

#[tokio::test]
async fn metadata_is_complete_for_known_and_blank_for_unknown() {
    for (id, source) in provider_cases() {
        let known = source.metadata(&ticker(KNOWN)).await.expect("known metadata");
        assert_eq!(known.name.as_deref(), Some("Apple Inc."), "{id}");
        assert_eq!(known.currency.as_deref(), Some("USD"), "{id}");

        let unknown = source
            .metadata(&ticker(UNKNOWN))
            .await
            .expect("unknown metadata");
        assert_eq!(unknown.name_or_na(), "N/A", "{id}");
        assert_eq!(unknown.sector_or_na(), "N/A", "{id}");
    }
}
