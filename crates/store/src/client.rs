//! HTTP client for the store's table REST endpoints.
//!
//! Reads are GETs against `/rest/v1/{table}` with the query parameters a
//! [`QueryPlan`] planned; inserts are POSTs with `Prefer: return=representation`
//! so the stored row comes back. Response shaping is split into pure functions
//! so status and body handling can be tested without a server.

use std::env;
use std::time::Duration;

use reqwest::{Client, StatusCode, header};
use serde_json::Value;
use steeple_util::truncate_chars;
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::plan::QueryPlan;

/// Longest body excerpt carried inside an error.
const BODY_PREVIEW_CHARS: usize = 240;

/// Configured client for one store deployment.
///
/// Credentials ride as default headers (`apikey` plus bearer token), so every
/// request built from this client is authenticated. Construct once at startup
/// and share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct StoreClient {
    base_url: String,
    http: Client,
    user_agent: String,
}

impl StoreClient {
    /// Build a client from validated settings.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let mut authorization = header::HeaderValue::from_str(&format!("Bearer {}", config.service_key))
            .map_err(|_| StoreError::NotConfigured)?;
        authorization.set_sensitive(true);
        let mut api_key =
            header::HeaderValue::from_str(&config.service_key).map_err(|_| StoreError::NotConfigured)?;
        api_key.set_sensitive(true);

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::AUTHORIZATION, authorization);
        default_headers.insert(header::HeaderName::from_static("apikey"), api_key);
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|error| StoreError::Transport(error.to_string()))?;

        Ok(Self {
            base_url: config.base_url,
            http,
            user_agent: format!("steeple/0.1; {}", env::consts::OS),
        })
    }

    /// Build a client from `STEEPLE_STORE_URL` / `STEEPLE_STORE_KEY`.
    pub fn from_env() -> Result<Self, StoreError> {
        Self::new(StoreConfig::from_env()?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute a planned read and return the raw rows.
    pub async fn read_rows(&self, plan: &QueryPlan) -> Result<Vec<Value>, StoreError> {
        let url = format!("{}/rest/v1/{}", self.base_url, plan.table);
        debug!(%url, table = plan.table, "store read");

        let response = self
            .http
            .get(&url)
            .header(header::USER_AGENT, &self.user_agent)
            .query(&plan.params)
            .send()
            .await
            .map_err(|error| StoreError::Transport(error.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        shape_rows(status, &body)
    }

    /// Insert one row and return the stored representation.
    pub async fn write_row(&self, table: &str, row: &Value) -> Result<Value, StoreError> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        debug!(%url, table, "store insert");

        let response = self
            .http
            .post(&url)
            .header(header::USER_AGENT, &self.user_agent)
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await
            .map_err(|error| StoreError::Transport(error.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        shape_inserted(status, &body)
    }
}

/// Turn a read response into rows or a classified error.
fn shape_rows(status: StatusCode, body: &str) -> Result<Vec<Value>, StoreError> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(StoreError::PolicyDenied(error_message_from(body)));
    }
    if !status.is_success() {
        return Err(StoreError::UnexpectedStatus {
            status: status.as_u16(),
            body: response_preview(body),
        });
    }

    let parsed: Value = serde_json::from_str(body).map_err(|error| StoreError::Decode(error.to_string()))?;
    match parsed {
        Value::Array(rows) => Ok(rows),
        other => Err(StoreError::Decode(format!(
            "expected a JSON array of rows, got {}",
            value_type_name(&other)
        ))),
    }
}

/// Turn an insert response into the stored row or a classified error.
///
/// With `Prefer: return=representation` the store answers with a one-element
/// array; an empty body (e.g. a proxy stripped the representation) is treated
/// as a successful insert with nothing to echo back.
fn shape_inserted(status: StatusCode, body: &str) -> Result<Value, StoreError> {
    if status == StatusCode::CONFLICT {
        return Err(StoreError::Conflict(error_message_from(body)));
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(StoreError::PolicyDenied(error_message_from(body)));
    }
    if !status.is_success() {
        return Err(StoreError::UnexpectedStatus {
            status: status.as_u16(),
            body: response_preview(body),
        });
    }
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    let parsed: Value = serde_json::from_str(body).map_err(|error| StoreError::Decode(error.to_string()))?;
    Ok(match parsed {
        Value::Array(mut rows) if !rows.is_empty() => rows.remove(0),
        Value::Array(_) => Value::Null,
        other => other,
    })
}

/// Pull the `message` field out of a store error body, if there is one.
fn error_message_from(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| response_preview(body))
}

fn response_preview(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "(empty body)".to_string();
    }
    truncate_chars(trimmed, BODY_PREVIEW_CHARS)
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
