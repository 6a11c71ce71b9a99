//! Client configuration from the environment.

use std::time::Duration;

/// Catalog served when no endpoint is configured.
pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";

pub const CATALOG_URL_ENV: &str = "STOREFRONT_CATALOG_URL";
pub const FETCH_TIMEOUT_ENV: &str = "STOREFRONT_FETCH_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Endpoint returning the catalog as a JSON array.
    pub catalog_url: String,
    /// Whole-request timeout for the catalog fetch. `None` waits indefinitely.
    pub fetch_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            fetch_timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new(catalog_url: impl Into<String>) -> Self {
        Self {
            catalog_url: catalog_url.into(),
            fetch_timeout: None,
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let catalog_url = lookup(CATALOG_URL_ENV)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());

        let fetch_timeout = lookup(FETCH_TIMEOUT_ENV).and_then(|raw| {
            match raw.trim().parse::<u64>() {
                Ok(0) => None,
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    tracing::warn!(value = %raw, "{FETCH_TIMEOUT_ENV} is not a whole number of seconds; ignoring");
                    None
                }
            }
        });

        Self {
            catalog_url,
            fetch_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(ClientConfig::from_lookup(lookup(&[])), ClientConfig::default());
        assert_eq!(ClientConfig::default().catalog_url, DEFAULT_CATALOG_URL);
    }

    #[test]
    fn reads_url_and_timeout() {
        let config = ClientConfig::from_lookup(lookup(&[
            (CATALOG_URL_ENV, " http://localhost:9000/products "),
            (FETCH_TIMEOUT_ENV, "15"),
        ]));

        assert_eq!(config.catalog_url, "http://localhost:9000/products");
        assert_eq!(config.fetch_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn blank_url_falls_back_to_default() {
        let config = ClientConfig::from_lookup(lookup(&[(CATALOG_URL_ENV, "  ")]));
        assert_eq!(config.catalog_url, DEFAULT_CATALOG_URL);
    }

    #[test]
    fn unparseable_or_zero_timeout_is_ignored() {
        for raw in ["soon", "-3", "1.5", "0"] {
            let config = ClientConfig::from_lookup(lookup(&[(FETCH_TIMEOUT_ENV, raw)]));
            assert_eq!(config.fetch_timeout, None, "value {raw:?}");
        }
    }
}
