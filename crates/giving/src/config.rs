//! Payments client configuration.
//!
//! `STEEPLE_PAYMENTS_BASE` names the processor's API root and
//! `STEEPLE_PAYMENTS_SECRET` the server-side secret key. The same URL rules
//! apply as for the store: localhost may use any scheme, everything else
//! must be HTTPS.

use std::env;

use url::Url;

use crate::error::GivingError;

/// Environment variable naming the payment processor's base URL.
pub const PAYMENTS_BASE_ENV: &str = "STEEPLE_PAYMENTS_BASE";
/// Environment variable carrying the processor secret key.
pub const PAYMENTS_SECRET_ENV: &str = "STEEPLE_PAYMENTS_SECRET";

const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

/// Validated connection settings for the payment processor.
#[derive(Debug, Clone)]
pub struct PaymentsConfig {
    /// Base URL without a trailing slash
    pub base_url: String,
    /// Secret key sent as the bearer credential
    pub secret_key: String,
}

impl PaymentsConfig {
    pub fn new(base_url: impl Into<String>, secret_key: impl Into<String>) -> Result<Self, GivingError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let secret_key = secret_key.into();
        if base_url.trim().is_empty() || secret_key.trim().is_empty() {
            return Err(GivingError::NotConfigured);
        }
        validate_base_url(&base_url)?;
        Ok(Self { base_url, secret_key })
    }

    /// Read `STEEPLE_PAYMENTS_BASE` / `STEEPLE_PAYMENTS_SECRET` from the
    /// environment.
    pub fn from_env() -> Result<Self, GivingError> {
        let base_url = env::var(PAYMENTS_BASE_ENV).map_err(|_| GivingError::NotConfigured)?;
        let secret_key = env::var(PAYMENTS_SECRET_ENV).map_err(|_| GivingError::NotConfigured)?;
        Self::new(base_url, secret_key)
    }
}

fn validate_base_url(base: &str) -> Result<(), GivingError> {
    let parsed = Url::parse(base).map_err(|error| GivingError::InvalidBaseUrl {
        url: base.to_string(),
        reason: error.to_string(),
    })?;

    let host = parsed.host_str().ok_or_else(|| GivingError::InvalidBaseUrl {
        url: base.to_string(),
        reason: "URL must include a host".into(),
    })?;

    if LOCALHOST_DOMAINS.iter().any(|&allowed| host.eq_ignore_ascii_case(allowed)) {
        return Ok(());
    }

    if parsed.scheme() != "https" {
        return Err(GivingError::InvalidBaseUrl {
            url: base.to_string(),
            reason: format!("https is required for non-localhost hosts; got '{}://'", parsed.scheme()),
        });
    }

    Ok(())
}
