use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Ticker symbol as entered by the caller.
///
/// The only local check is non-emptiness; providers decide whether a ticker
/// exists. Comparison is case-insensitive because providers treat `aapl` and
/// `AAPL` as the same company.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TickerSymbol(String);

impl TickerSymbol {
    /// Parse a ticker, trimming surrounding whitespace.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-cased form sent to providers.
    pub fn provider_key(&self) -> String {
        self.0.to_ascii_uppercase()
    }
}

impl PartialEq for TickerSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Display for TickerSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for TickerSymbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for TickerSymbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<TickerSymbol> for String {
    fn from(value: TickerSymbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_but_keeps_caller_casing() {
        let parsed = TickerSymbol::parse(" brk.b ").expect("ticker should parse");
        assert_eq!(parsed.as_str(), "brk.b");
        assert_eq!(parsed.provider_key(), "BRK.B");
    }

    #[test]
    fn rejects_blank_input() {
        let err = TickerSymbol::parse("   ").expect_err("must fail");
        assert_eq!(err, ValidationError::EmptySymbol);
    }

    #[test]
    fn compares_case_insensitively() {
        let lower = TickerSymbol::parse("msft").expect("valid");
        let upper = TickerSymbol::parse("MSFT").expect("valid");
        assert_eq!(lower, upper);
    }
}
