//! Runtime configuration for provider clients.
//!
//! Values come from the environment so credentials never need to appear on a
//! command line:
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FREECASH_TIMEOUT_MS` | `10000` | Per-request HTTP timeout |
//! | `FREECASH_USER_AGENT` | `freecash/<version>` | User agent sent upstream |
//! | `YAHOO_COOKIE` | unset | Pre-authenticated Yahoo cookie, skips the cookie bootstrap |

use tracing::warn;

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

const TIMEOUT_ENV: &str = "FREECASH_TIMEOUT_MS";
const USER_AGENT_ENV: &str = "FREECASH_USER_AGENT";
const COOKIE_ENV: &str = "YAHOO_COOKIE";

/// Transport settings shared by the HTTP-backed adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub timeout_ms: u64,
    pub user_agent: String,
    /// Never logged.
    pub cookie: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: format!("freecash/{}", env!("CARGO_PKG_VERSION")),
            cookie: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(timeout_ms) if timeout_ms > 0 => config.timeout_ms = timeout_ms,
                _ => warn!(
                    variable = TIMEOUT_ENV,
                    value = %raw,
                    default = DEFAULT_TIMEOUT_MS,
                    "ignoring invalid timeout"
                ),
            }
        }

        if let Some(user_agent) = lookup(USER_AGENT_ENV).filter(|value| !value.trim().is_empty()) {
            config.user_agent = user_agent.trim().to_owned();
        }

        config.cookie = lookup(COOKIE_ENV).filter(|value| !value.trim().is_empty());
        config
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| values.get(key).cloned()
    }

    #[test]
    fn reads_overrides_from_environment() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("FREECASH_TIMEOUT_MS", "2500"),
            ("FREECASH_USER_AGENT", "desk/1.0"),
            ("YAHOO_COOKIE", "A1=abc"),
        ]));

        assert_eq!(config.timeout_ms, 2_500);
        assert_eq!(config.user_agent, "desk/1.0");
        assert_eq!(config.cookie.as_deref(), Some("A1=abc"));
    }

    #[test]
    fn invalid_timeout_keeps_default() {
        let config = ClientConfig::from_lookup(lookup_from(&[("FREECASH_TIMEOUT_MS", "soon")]));
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);

        let zero = ClientConfig::from_lookup(lookup_from(&[("FREECASH_TIMEOUT_MS", "0")]));
        assert_eq!(zero.timeout_ms, DEFAULT_TIMEOUT_MS);
    }
}
