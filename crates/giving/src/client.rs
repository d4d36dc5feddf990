//! HTTP client for the payment processor.
//!
//! One endpoint matters here: `POST /v1/payment_intents`, form-encoded the
//! way the processor expects, with the fund and frequency riding in
//! `metadata[...]` keys. Request shaping and response shaping are pure
//! functions so bounds checks and error extraction are testable offline.

use std::env;
use std::time::Duration;

use reqwest::{Client, StatusCode, header};
use serde_json::Value;
use steeple_types::{DonationRequest, PaymentIntent};
use steeple_util::truncate_chars;
use tracing::debug;
use url::form_urlencoded;

use crate::config::PaymentsConfig;
use crate::error::GivingError;

/// Smallest accepted donation, in minor currency units.
pub const MIN_DONATION_MINOR: u64 = 100;
/// Largest accepted donation, in minor currency units.
pub const MAX_DONATION_MINOR: u64 = 100_000_000;

/// Currencies the giving page offers.
pub const SUPPORTED_CURRENCIES: &[&str] = &["usd", "cad"];

const BODY_PREVIEW_CHARS: usize = 240;

/// Configured client for the payment processor.
///
/// The secret key rides as a default bearer header, marked sensitive so it
/// never shows up in request logs.
#[derive(Debug, Clone)]
pub struct PaymentsClient {
    base_url: String,
    http: Client,
    user_agent: String,
}

impl PaymentsClient {
    pub fn new(config: PaymentsConfig) -> Result<Self, GivingError> {
        let mut authorization = header::HeaderValue::from_str(&format!("Bearer {}", config.secret_key))
            .map_err(|_| GivingError::NotConfigured)?;
        authorization.set_sensitive(true);

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::AUTHORIZATION, authorization);
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|error| GivingError::Transport(error.to_string()))?;

        Ok(Self {
            base_url: config.base_url,
            http,
            user_agent: format!("steeple/0.1; {}", env::consts::OS),
        })
    }

    /// Build a client from `STEEPLE_PAYMENTS_BASE` / `STEEPLE_PAYMENTS_SECRET`.
    pub fn from_env() -> Result<Self, GivingError> {
        Self::new(PaymentsConfig::from_env()?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Validate a donation request and open a payment intent for it.
    ///
    /// The returned intent carries the `client_secret` the browser needs to
    /// confirm the payment. Do not log it.
    pub async fn create_payment_intent(&self, request: &DonationRequest) -> Result<PaymentIntent, GivingError> {
        let form = intent_form(request)?;
        let url = format!("{}/v1/payment_intents", self.base_url);
        debug!(%url, amount_minor = request.amount_minor, fund = %request.fund, "creating payment intent");

        let response = self
            .http
            .post(&url)
            .header(header::USER_AGENT, &self.user_agent)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(encode_form(&form))
            .send()
            .await
            .map_err(|error| GivingError::Transport(error.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        shape_intent(status, &body)
    }
}

/// Validate a donation request and shape it into processor form fields.
///
/// Public so `steeple donate --dry-run` can show exactly what would be sent
/// without holding a secret key.
pub fn intent_form(request: &DonationRequest) -> Result<Vec<(&'static str, String)>, GivingError> {
    if request.amount_minor < MIN_DONATION_MINOR {
        return Err(GivingError::InvalidRequest(format!(
            "donation amount must be at least {MIN_DONATION_MINOR} minor units"
        )));
    }
    if request.amount_minor > MAX_DONATION_MINOR {
        return Err(GivingError::InvalidRequest(format!(
            "donation amount cannot exceed {MAX_DONATION_MINOR} minor units"
        )));
    }

    let currency = request.currency.trim().to_ascii_lowercase();
    if !SUPPORTED_CURRENCIES.contains(&currency.as_str()) {
        return Err(GivingError::InvalidRequest(format!(
            "currency '{currency}' is not accepted; expected one of: {}",
            SUPPORTED_CURRENCIES.join(", ")
        )));
    }

    let fund = request.fund.trim();
    if fund.is_empty() {
        return Err(GivingError::InvalidRequest("a fund must be selected".into()));
    }

    let mut form = vec![
        ("amount", request.amount_minor.to_string()),
        ("currency", currency),
        ("metadata[fund]", fund.to_string()),
        ("metadata[frequency]", request.frequency.as_str().to_string()),
    ];
    if let Some(email) = request.donor_email.as_deref() {
        let email = email.trim();
        if !email.is_empty() {
            form.push(("receipt_email", email.to_string()));
        }
    }
    Ok(form)
}

/// Percent-encode form fields into a request body.
pub fn encode_form(form: &[(&'static str, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(form.iter().map(|(key, value)| (*key, value.as_str())))
        .finish()
}

/// Turn a processor response into a payment intent or a classified error.
fn shape_intent(status: StatusCode, body: &str) -> Result<PaymentIntent, GivingError> {
    if status.is_client_error() {
        return Err(GivingError::Rejected {
            status: status.as_u16(),
            message: processor_message(body),
        });
    }
    if !status.is_success() {
        return Err(GivingError::UnexpectedStatus {
            status: status.as_u16(),
            body: response_preview(body),
        });
    }
    serde_json::from_str(body).map_err(|error| GivingError::Decode(error.to_string()))
}

/// Pull the message out of a processor error body, if there is one.
///
/// Processor errors nest the human-readable part under `error.message`.
fn processor_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.pointer("/error/message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| response_preview(body))
}

fn response_preview(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "(empty body)".to_string();
    }
    truncate_chars(trimmed, BODY_PREVIEW_CHARS)
}
