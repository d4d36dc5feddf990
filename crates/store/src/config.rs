//! Store client configuration.
//!
//! Credentials come from the environment: `STEEPLE_STORE_URL` names the
//! managed database's REST endpoint and `STEEPLE_STORE_KEY` the service key
//! sent as both `apikey` and bearer token. Construction validates the base
//! URL up front so a bad deployment fails at startup, not mid-request.

use std::env;

use url::Url;

use crate::error::StoreError;

/// Environment variable naming the store's REST base URL.
pub const STORE_URL_ENV: &str = "STEEPLE_STORE_URL";
/// Environment variable carrying the store service key.
pub const STORE_KEY_ENV: &str = "STEEPLE_STORE_KEY";

/// Hostnames allowed to use plain HTTP for local development.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

/// Validated connection settings for the content store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL without a trailing slash, e.g. `https://db.example.church`
    pub base_url: String,
    /// Service key sent on every request
    pub service_key: String,
}

impl StoreConfig {
    /// Build a config from explicit values, validating the base URL.
    ///
    /// Rules:
    /// - `localhost` / `127.0.0.1`: any scheme is allowed
    /// - any other host must use HTTPS
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Result<Self, StoreError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let service_key = service_key.into();
        if base_url.trim().is_empty() || service_key.trim().is_empty() {
            return Err(StoreError::NotConfigured);
        }
        validate_base_url(&base_url)?;
        Ok(Self { base_url, service_key })
    }

    /// Read `STEEPLE_STORE_URL` / `STEEPLE_STORE_KEY` from the environment.
    ///
    /// Missing or empty variables yield [`StoreError::NotConfigured`]; callers
    /// that want the site to keep serving bundled defaults swap in
    /// [`crate::UnconfiguredStore`] on that error.
    pub fn from_env() -> Result<Self, StoreError> {
        let base_url = env::var(STORE_URL_ENV).map_err(|_| StoreError::NotConfigured)?;
        let service_key = env::var(STORE_KEY_ENV).map_err(|_| StoreError::NotConfigured)?;
        Self::new(base_url, service_key)
    }
}

fn validate_base_url(base: &str) -> Result<(), StoreError> {
    let parsed = Url::parse(base).map_err(|error| StoreError::InvalidBaseUrl {
        url: base.to_string(),
        reason: error.to_string(),
    })?;

    let host = parsed.host_str().ok_or_else(|| StoreError::InvalidBaseUrl {
        url: base.to_string(),
        reason: "URL must include a host".into(),
    })?;

    if LOCALHOST_DOMAINS.iter().any(|&allowed| host.eq_ignore_ascii_case(allowed)) {
        return Ok(());
    }

    if parsed.scheme() != "https" {
        return Err(StoreError::InvalidBaseUrl {
            url: base.to_string(),
            reason: format!("https is required for non-localhost hosts; got '{}://'", parsed.scheme()),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_https_host_and_strips_trailing_slash() {
        let config = StoreConfig::new("https://db.example.church/", "service-key").expect("valid config");
        assert_eq!(config.base_url, "https://db.example.church");
    }

    #[test]
    fn accepts_plain_http_on_localhost() {
        assert!(StoreConfig::new("http://localhost:54321", "k").is_ok());
        assert!(StoreConfig::new("http://127.0.0.1:54321", "k").is_ok());
    }

    #[test]
    fn rejects_plain_http_off_localhost() {
        let error = StoreConfig::new("http://db.example.church", "k").expect_err("must reject http");
        assert!(matches!(error, StoreError::InvalidBaseUrl { .. }), "got {error:?}");
    }

    #[test]
    fn rejects_unparsable_url() {
        let error = StoreConfig::new("not a url", "k").expect_err("must reject garbage");
        assert!(matches!(error, StoreError::InvalidBaseUrl { .. }), "got {error:?}");
    }

    #[test]
    fn empty_values_are_not_configured() {
        assert!(matches!(StoreConfig::new("", "k"), Err(StoreError::NotConfigured)));
        assert!(matches!(
            StoreConfig::new("https://db.example.church", "  "),
            Err(StoreError::NotConfigured)
        ));
    }

    #[test]
    fn from_env_reads_both_variables() {
        temp_env::with_vars(
            [
                (STORE_URL_ENV, Some("https://db.example.church")),
                (STORE_KEY_ENV, Some("service-key")),
            ],
            || {
                let config = StoreConfig::from_env().expect("configured");
                assert_eq!(config.base_url, "https://db.example.church");
                assert_eq!(config.service_key, "service-key");
            },
        );
    }

    #[test]
    fn from_env_without_key_is_not_configured() {
        temp_env::with_vars(
            [(STORE_URL_ENV, Some("https://db.example.church")), (STORE_KEY_ENV, None)],
            || {
                assert!(matches!(StoreConfig::from_env(), Err(StoreError::NotConfigured)));
            },
        );
    }
}
