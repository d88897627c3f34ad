use std::collections::HashMap;

use time::macros::date;
use time::Date;

use crate::data_source::{DataSource, SourceError, SourceFuture};
use crate::{
    CompanyMetadata, FinancialStatement, Period, ProviderId, StatementKind, StatementRow,
    StatementSet, TickerSymbol,
};

/// Canned statements and metadata for one company.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureCompany {
    pub statements: StatementSet,
    pub metadata: CompanyMetadata,
}

/// Offline provider serving fixed data from memory.
///
/// Lookups are case-insensitive. Unknown tickers behave like the live
/// provider: empty statements and empty metadata.
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    companies: HashMap<String, FixtureCompany>,
    failures: HashMap<String, SourceError>,
    metadata_failures: HashMap<String, SourceError>,
}

impl Default for FixtureProvider {
    /// Seeded with `AAPL` (newest period first, current provider labels) and
    /// `MSFT` (oldest period first, legacy labels).
    fn default() -> Self {
        Self::empty()
            .with_company("AAPL", apple_statements(), metadata("Apple Inc.", "United States"))
            .with_company(
                "MSFT",
                microsoft_statements(),
                metadata("Microsoft Corporation", "United States"),
            )
    }
}

impl FixtureProvider {
    pub fn empty() -> Self {
        Self {
            companies: HashMap::new(),
            failures: HashMap::new(),
            metadata_failures: HashMap::new(),
        }
    }

    pub fn with_company(
        mut self,
        ticker: &str,
        statements: StatementSet,
        metadata: CompanyMetadata,
    ) -> Self {
        self.companies.insert(
            ticker.trim().to_ascii_uppercase(),
            FixtureCompany {
                statements,
                metadata,
            },
        );
        self
    }

    /// Makes every call for `ticker` fail with `error`.
    pub fn with_failure(mut self, ticker: &str, error: SourceError) -> Self {
        self.failures.insert(ticker.trim().to_ascii_uppercase(), error);
        self
    }

    /// Makes only metadata calls for `ticker` fail; statements are still served.
    pub fn with_metadata_failure(mut self, ticker: &str, error: SourceError) -> Self {
        self.metadata_failures
            .insert(ticker.trim().to_ascii_uppercase(), error);
        self
    }

    fn lookup(&self, ticker: &TickerSymbol) -> Result<Option<&FixtureCompany>, SourceError> {
        let key = ticker.provider_key();
        if let Some(error) = self.failures.get(&key) {
            return Err(error.clone());
        }
        Ok(self.companies.get(&key))
    }
}

impl DataSource for FixtureProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Fixture
    }

    fn statement<'a>(
        &'a self,
        ticker: &'a TickerSymbol,
        kind: StatementKind,
    ) -> SourceFuture<'a, FinancialStatement> {
        Box::pin(async move {
            Ok(self
                .lookup(ticker)?
                .map(|company| company.statements.get(kind).clone())
                .unwrap_or_default())
        })
    }

    fn metadata<'a>(&'a self, ticker: &'a TickerSymbol) -> SourceFuture<'a, CompanyMetadata> {
        Box::pin(async move {
            if let Some(error) = self.metadata_failures.get(&ticker.provider_key()) {
                return Err(error.clone());
            }
            Ok(self
                .lookup(ticker)?
                .map(|company| company.metadata.clone())
                .unwrap_or_default())
        })
    }
}

fn metadata(name: &str, country: &str) -> CompanyMetadata {
    CompanyMetadata {
        name: Some(name.to_owned()),
        sector: Some(String::from("Technology")),
        country: Some(country.to_owned()),
        currency: Some(String::from("USD")),
    }
}

fn apple_statements() -> StatementSet {
    let periods = [
        date!(2024 - 09 - 28),
        date!(2023 - 09 - 30),
        date!(2022 - 09 - 24),
        date!(2021 - 09 - 25),
    ];
    StatementSet {
        income: table(
            periods,
            &[
                ("Total Revenue", [391_035.0, 383_285.0, 394_328.0, 365_817.0]),
                ("Net Income", [93_736.0, 96_995.0, 99_803.0, 94_680.0]),
            ],
        ),
        balance_sheet: table(
            periods,
            &[
                ("Total Assets", [364_980.0, 352_583.0, 352_755.0, 351_002.0]),
                ("Stockholders Equity", [56_950.0, 62_146.0, 50_672.0, 63_090.0]),
            ],
        ),
        cash_flow: table(
            periods,
            &[
                ("Operating Cash Flow", [118_254.0, 110_543.0, 122_151.0, 104_038.0]),
                ("Capital Expenditure", [-9_447.0, -10_959.0, -10_708.0, -11_085.0]),
                ("Free Cash Flow", [108_807.0, 99_584.0, 111_443.0, 92_953.0]),
            ],
        ),
    }
}

fn microsoft_statements() -> StatementSet {
    let periods = [
        date!(2022 - 06 - 30),
        date!(2023 - 06 - 30),
        date!(2024 - 06 - 30),
    ];
    StatementSet {
        income: table(
            periods,
            &[
                ("Total Revenue", [198_270.0, 211_915.0, 245_122.0]),
                ("Net Income", [72_738.0, 72_361.0, 88_136.0]),
            ],
        ),
        balance_sheet: table(periods, &[("Total Assets", [364_840.0, 411_976.0, 512_163.0])]),
        cash_flow: table(
            periods,
            &[
                ("Total Cash From Operating Activities", [89_035.0, 87_582.0, 118_548.0]),
                ("Capital Expenditures", [-23_886.0, -28_107.0, -44_477.0]),
            ],
        ),
    }
}

/// Builds a table from values in millions. Row widths are fixed by `N`; a
/// repeated period yields an empty table.
fn table<const N: usize>(periods: [Date; N], rows: &[(&str, [f64; N])]) -> FinancialStatement {
    let periods = periods.into_iter().map(Period::new).collect();
    let rows = rows
        .iter()
        .map(|(label, values)| {
            StatementRow::new(
                *label,
                values.iter().map(|value| Some(value * 1_000_000.0)).collect(),
            )
        })
        .collect();

    FinancialStatement::new(periods, rows).unwrap_or_default()
}
