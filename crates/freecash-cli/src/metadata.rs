use std::fmt::{Display, Formatter};

use freecash_core::{ProviderId, TickerSymbol};
use serde::Serialize;
use uuid::Uuid;

/// Request identifier (UUID v4) attached to every command response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Response metadata. Field order is fixed so JSON output stays stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseMeta {
    pub request_id: RequestId,
    pub provider: ProviderId,
    pub ticker: TickerSymbol,
    pub latency_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ResponseMeta {
    pub fn new(provider: ProviderId, ticker: TickerSymbol, latency_ms: u64) -> Self {
        Self {
            request_id: RequestId::new_v4(),
            provider,
            ticker,
            latency_ms,
            warnings: Vec::new(),
        }
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

/// Top-level JSON document written to stdout.
#[derive(Debug, Clone, Serialize)]
pub struct Response<T> {
    pub meta: ResponseMeta,
    pub data: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_is_uuid_v4() {
        let request_id = RequestId::new_v4();
        assert_eq!(request_id.0.get_version_num(), 4);
    }

    #[test]
    fn empty_warnings_are_omitted() {
        let ticker = TickerSymbol::parse("AAPL").expect("valid");
        let mut meta = ResponseMeta::new(ProviderId::Fixture, ticker, 12);

        let rendered = serde_json::to_value(&meta).expect("serializes");
        assert!(rendered.get("warnings").is_none());
        assert_eq!(rendered["provider"], "fixture");
        assert_eq!(rendered["latency_ms"], 12);

        meta.push_warning("free cash flow unavailable");
        let rendered = serde_json::to_value(&meta).expect("serializes");
        assert_eq!(rendered["warnings"][0], "free cash flow unavailable");
    }
}
