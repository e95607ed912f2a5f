//! API client configuration.

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3100";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the forms API lives and how to talk to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL the endpoint paths are appended to.
    pub base_url: String,
    /// Bearer token sent with every request, if any.
    pub token: Option<String>,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.into(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                 | Default                 |
    /// |--------------------------|-------------------------|
    /// | `FORMDESK_API_URL`       | `http://127.0.0.1:3100` |
    /// | `FORMDESK_API_TOKEN`     | none                    |
    /// | `FORMDESK_TIMEOUT_SECS`  | `30`                    |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("FORMDESK_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.into());
        let token = lookup("FORMDESK_API_TOKEN").filter(|v| !v.trim().is_empty());
        let timeout = match lookup("FORMDESK_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                log::warn!("Ignoring FORMDESK_TIMEOUT_SECS={raw}: not a whole number of seconds");
                DEFAULT_TIMEOUT_SECS
            }),
            None => DEFAULT_TIMEOUT_SECS,
        };
        Self {
            base_url,
            token,
            timeout: Duration::from_secs(timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(ClientConfig::from_lookup(lookup(&[])), ClientConfig::default());
    }

    #[test]
    fn reads_all_variables() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("FORMDESK_API_URL", "https://api.example.com/v1"),
            ("FORMDESK_API_TOKEN", "secret"),
            ("FORMDESK_TIMEOUT_SECS", " 5 "),
        ]));
        assert_eq!(config.base_url, "https://api.example.com/v1");
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn blank_values_and_bad_timeout_fall_back() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("FORMDESK_API_URL", ""),
            ("FORMDESK_API_TOKEN", "  "),
            ("FORMDESK_TIMEOUT_SECS", "soon"),
        ]));
        assert_eq!(config, ClientConfig::default());
    }
}
