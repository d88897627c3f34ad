use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};
use time::OffsetDateTime;
use tracing::debug;

use crate::config::ClientConfig;
use crate::data_source::{DataSource, SourceError, SourceFuture};
use crate::http_client::{
    HttpAuth, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient,
};
use crate::{
    CompanyMetadata, FinancialStatement, Period, ProviderId, StatementKind, StatementRow,
    TickerSymbol,
};

const TIMESERIES_URL: &str =
    "https://query2.finance.yahoo.com/ws/fundamentals-timeseries/v1/finance/timeseries";
const QUOTE_SUMMARY_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";
const COOKIE_URL: &str = "https://fc.yahoo.com";
const CRUMB_ENDPOINTS: [&str; 2] = [
    "https://query1.finance.yahoo.com/v1/test/getcrumb",
    "https://query2.finance.yahoo.com/v1/test/getcrumb",
];
const REFERER: &str = "https://finance.yahoo.com/";

/// 2016-12-31, the earliest period start Yahoo serves annual fundamentals for.
const PERIOD_START: i64 = 1_483_142_400;
const ANNUAL_PREFIX: &str = "annual";

const INCOME_TYPES: &[&str] = &[
    "TotalRevenue",
    "CostOfRevenue",
    "GrossProfit",
    "OperatingIncome",
    "NetIncome",
    "EBITDA",
    "DilutedEPS",
    "BasicEPS",
    "ResearchAndDevelopment",
    "SellingGeneralAndAdministration",
    "TaxProvision",
    "InterestExpense",
];

const BALANCE_SHEET_TYPES: &[&str] = &[
    "TotalAssets",
    "TotalLiabilitiesNetMinorityInterest",
    "StockholdersEquity",
    "CashAndCashEquivalents",
    "CurrentAssets",
    "CurrentLiabilities",
    "TotalDebt",
    "NetDebt",
    "WorkingCapital",
    "RetainedEarnings",
    "OrdinarySharesNumber",
];

const CASH_FLOW_TYPES: &[&str] = &[
    "FreeCashFlow",
    "OperatingCashFlow",
    "CapitalExpenditure",
    "InvestingCashFlow",
    "FinancingCashFlow",
    "EndCashPosition",
    "BeginningCashPosition",
    "ChangesInCash",
    "RepurchaseOfCapitalStock",
    "CashDividendsPaid",
    "IssuanceOfDebt",
    "RepaymentOfDebt",
    "DepreciationAndAmortization",
    "StockBasedCompensation",
    "NetIncomeFromContinuingOperations",
];

/// Yahoo Finance adapter.
///
/// Statements come from the fundamentals-timeseries endpoint (annual series
/// only). Metadata comes from `quoteSummary`, which requires a session crumb;
/// the crumb is fetched on every metadata call and never cached.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    auth: HttpAuth,
    timeout_ms: u64,
}

impl YahooAdapter {
    /// Builds an adapter over a reqwest client configured from `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, SourceError> {
        let http_client = ReqwestHttpClient::new(config)
            .map_err(|error| SourceError::internal(error.message()))?;
        let auth = config
            .cookie
            .clone()
            .map_or(HttpAuth::None, HttpAuth::Cookie);

        Ok(Self::with_http_client(Arc::new(http_client), auth).with_timeout_ms(config.timeout_ms))
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, auth: HttpAuth) -> Self {
        Self {
            http_client,
            auth,
            timeout_ms: crate::config::DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    fn request(&self, url: String) -> HttpRequest {
        HttpRequest::get(url)
            .with_header("referer", REFERER)
            .with_auth(&self.auth)
            .with_timeout_ms(self.timeout_ms)
    }

    async fn get(&self, url: String) -> Result<HttpResponse, SourceError> {
        let response = self
            .http_client
            .execute(self.request(url))
            .await
            .map_err(transport_error)?;
        check_status(&response)?;
        Ok(response)
    }

    async fn fetch_statement(
        &self,
        ticker: &TickerSymbol,
        kind: StatementKind,
    ) -> Result<FinancialStatement, SourceError> {
        let types = statement_types(kind);
        let symbol = urlencoding::encode(&ticker.provider_key()).into_owned();
        let type_param = types
            .iter()
            .map(|name| format!("{ANNUAL_PREFIX}{name}"))
            .collect::<Vec<_>>()
            .join(",");
        let url = format!(
            "{TIMESERIES_URL}/{symbol}?symbol={symbol}&type={type_param}&period1={PERIOD_START}&period2={}",
            OffsetDateTime::now_utc().unix_timestamp()
        );

        debug!(ticker = %ticker, statement = %kind, "requesting yahoo timeseries");
        let response = self.get(url).await?;
        parse_timeseries(&response.body, types)
    }

    async fn fetch_metadata(&self, ticker: &TickerSymbol) -> Result<CompanyMetadata, SourceError> {
        let crumb = self.fetch_crumb().await?;
        let url = format!(
            "{QUOTE_SUMMARY_URL}/{}?modules=price,assetProfile&crumb={}",
            urlencoding::encode(&ticker.provider_key()),
            urlencoding::encode(&crumb)
        );

        debug!(ticker = %ticker, "requesting yahoo quote summary");
        let response = self.get(url).await?;
        parse_quote_summary(&response.body)
    }

    /// Bootstraps a session cookie (unless one was supplied) and exchanges it
    /// for a crumb.
    async fn fetch_crumb(&self) -> Result<String, SourceError> {
        if self.auth == HttpAuth::None {
            // fc.yahoo.com answers 404 but still sets the session cookie.
            self.http_client
                .execute(self.request(String::from(COOKIE_URL)))
                .await
                .map_err(transport_error)?;
        }

        for endpoint in CRUMB_ENDPOINTS {
            let request = self.request(endpoint.to_owned());
            let response = match self.http_client.execute(request).await {
                Ok(response) => response,
                Err(error) => {
                    debug!(endpoint, "crumb request failed: {}", error.message());
                    continue;
                }
            };
            if response.status == 429 {
                return Err(SourceError::rate_limited(
                    "yahoo rate limited while fetching crumb",
                ));
            }
            if !response.is_success() {
                continue;
            }

            let body = response.body.trim();
            if body.to_ascii_lowercase().contains("too many requests") {
                return Err(SourceError::rate_limited(
                    "yahoo rate limited while fetching crumb",
                ));
            }
            if is_plausible_crumb(body) {
                return Ok(body.to_owned());
            }
        }

        Err(SourceError::unavailable(
            "failed to fetch yahoo crumb from all endpoints",
        ))
    }
}

impl DataSource for YahooAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn statement<'a>(
        &'a self,
        ticker: &'a TickerSymbol,
        kind: StatementKind,
    ) -> SourceFuture<'a, FinancialStatement> {
        Box::pin(self.fetch_statement(ticker, kind))
    }

    fn metadata<'a>(&'a self, ticker: &'a TickerSymbol) -> SourceFuture<'a, CompanyMetadata> {
        Box::pin(self.fetch_metadata(ticker))
    }
}

/// Rejects HTML error pages and anything else that cannot be a crumb token.
fn is_plausible_crumb(body: &str) -> bool {
    !body.is_empty() && body.len() < 100 && !body.contains(char::is_whitespace) && !body.contains('<')
}

fn statement_types(kind: StatementKind) -> &'static [&'static str] {
    match kind {
        StatementKind::Income => INCOME_TYPES,
        StatementKind::BalanceSheet => BALANCE_SHEET_TYPES,
        StatementKind::CashFlow => CASH_FLOW_TYPES,
    }
}

fn check_status(response: &HttpResponse) -> Result<(), SourceError> {
    match response.status {
        _ if response.is_success() => Ok(()),
        404 => Err(SourceError::not_found("yahoo returned status 404")),
        429 => Err(SourceError::rate_limited("yahoo returned status 429")),
        400 => Err(SourceError::invalid_request("yahoo returned status 400")),
        status => Err(SourceError::unavailable(format!(
            "yahoo returned status {status}"
        ))),
    }
}

fn transport_error(error: HttpError) -> SourceError {
    if error.retryable() {
        SourceError::unavailable(format!("yahoo request failed: {}", error.message()))
    } else {
        SourceError::internal(format!("yahoo request failed: {}", error.message()))
    }
}

// ============================================================================
// Fundamentals timeseries
// ============================================================================

#[derive(Debug, Deserialize)]
struct TimeseriesResponse {
    timeseries: TimeseriesData,
}

#[derive(Debug, Deserialize)]
struct TimeseriesData {
    #[serde(default)]
    result: Option<Vec<Map<String, Value>>>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct TimeseriesMeta {
    #[serde(rename = "type", default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TimeseriesPoint {
    #[serde(rename = "asOfDate")]
    as_of_date: String,
    #[serde(rename = "reportedValue", default)]
    reported_value: Option<YahooRawValue>,
}

#[derive(Debug, Deserialize)]
struct YahooRawValue {
    #[serde(default)]
    raw: Option<f64>,
}

impl YahooRawValue {
    fn to_option(&self) -> Option<f64> {
        self.raw.filter(|value| value.is_finite())
    }
}

/// Converts a timeseries payload into a table whose columns are the union of
/// reported dates, newest first, and whose rows follow `types` order.
fn parse_timeseries(body: &str, types: &[&str]) -> Result<FinancialStatement, SourceError> {
    let response: TimeseriesResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::internal(format!("failed to parse yahoo timeseries: {e}")))?;

    if let Some(error) = response.timeseries.error.filter(|error| !error.is_null()) {
        return Err(SourceError::unavailable(format!(
            "yahoo timeseries API error: {error}"
        )));
    }

    let mut series = Vec::new();
    for mut item in response.timeseries.result.unwrap_or_default() {
        let Some(meta) = item.remove("meta") else {
            continue;
        };
        let meta: TimeseriesMeta = serde_json::from_value(meta)
            .map_err(|e| SourceError::internal(format!("invalid yahoo timeseries meta: {e}")))?;
        let Some(key) = meta.types.into_iter().next() else {
            continue;
        };
        let Some(points) = item.remove(&key) else {
            continue;
        };
        let points: Vec<Option<TimeseriesPoint>> = serde_json::from_value(points).map_err(|e| {
            SourceError::internal(format!("invalid yahoo timeseries values for {key}: {e}"))
        })?;

        let mut values = BTreeMap::new();
        for point in points.into_iter().flatten() {
            let period = Period::parse(&point.as_of_date)
                .map_err(|e| SourceError::internal(e.to_string()))?;
            values.insert(period, point.reported_value.and_then(|value| value.to_option()));
        }
        if values.is_empty() {
            continue;
        }

        let name = key.strip_prefix(ANNUAL_PREFIX).unwrap_or(&key);
        let position = types
            .iter()
            .position(|candidate| *candidate == name)
            .unwrap_or(types.len());
        series.push((position, humanize_label(name), values));
    }

    series.sort_by_key(|(position, _, _)| *position);

    let periods = series
        .iter()
        .flat_map(|(_, _, values)| values.keys().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>();
    let rows = series
        .into_iter()
        .map(|(_, label, values)| {
            let cells = periods
                .iter()
                .map(|period| values.get(period).copied().flatten())
                .collect();
            StatementRow::new(label, cells)
        })
        .collect();

    FinancialStatement::new(periods, rows).map_err(|e| SourceError::internal(e.to_string()))
}

/// Splits a camel-case series name into words, keeping acronyms together:
/// `PurchaseOfPPE` becomes `Purchase Of PPE`.
fn humanize_label(name: &str) -> String {
    let chars = name.chars().collect::<Vec<_>>();
    let mut label = String::with_capacity(name.len() + 8);

    for (index, current) in chars.iter().enumerate() {
        if index > 0 && current.is_ascii_uppercase() {
            let previous = chars[index - 1];
            let next_is_lower = chars
                .get(index + 1)
                .is_some_and(|next| next.is_ascii_lowercase());
            if previous.is_ascii_lowercase()
                || previous.is_ascii_digit()
                || (previous.is_ascii_uppercase() && next_is_lower)
            {
                label.push(' ');
            }
        }
        label.push(*current);
    }

    label
}

// ============================================================================
// Quote summary
// ============================================================================

#[derive(Debug, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryData,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryData {
    #[serde(default)]
    result: Option<Vec<QuoteSummaryResult>>,
    #[serde(default)]
    error: Option<YahooApiError>,
}

#[derive(Debug, Deserialize)]
struct YahooApiError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResult {
    #[serde(default)]
    price: Option<PriceModule>,
    #[serde(rename = "assetProfile", default)]
    asset_profile: Option<AssetProfileModule>,
}

#[derive(Debug, Deserialize)]
struct PriceModule {
    #[serde(rename = "longName", default)]
    long_name: Option<String>,
    #[serde(rename = "shortName", default)]
    short_name: Option<String>,
    #[serde(default)]
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AssetProfileModule {
    #[serde(default)]
    sector: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

fn parse_quote_summary(body: &str) -> Result<CompanyMetadata, SourceError> {
    let response: QuoteSummaryResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::internal(format!("failed to parse yahoo quote summary: {e}")))?;

    if let Some(error) = response.quote_summary.error {
        let description = error.description.unwrap_or_default();
        return Err(match error.code.as_deref() {
            Some("Not Found") => SourceError::not_found(format!("yahoo quote summary: {description}")),
            code => SourceError::unavailable(format!(
                "yahoo quote summary API error {}: {description}",
                code.unwrap_or("unknown")
            )),
        });
    }

    let Some(result) = response
        .quote_summary
        .result
        .and_then(|results| results.into_iter().next())
    else {
        return Ok(CompanyMetadata::default());
    };

    let (name, currency) = match result.price {
        Some(price) => (
            non_blank(price.long_name).or(non_blank(price.short_name)),
            non_blank(price.currency),
        ),
        None => (None, None),
    };
    let (sector, country) = match result.asset_profile {
        Some(profile) => (non_blank(profile.sector), non_blank(profile.country)),
        None => (None, None),
    };

    Ok(CompanyMetadata {
        name,
        sector,
        country,
        currency,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
