//! Client for the managed content store.
//!
//! The store exposes each Postgres table over a REST surface
//! (`/rest/v1/{table}` with filter, order and limit query parameters). This
//! crate turns typed [`ContentRequest`]s into those table reads and offers a
//! single-row insert path for form and donation rows.
//!
//! Consumers depend on the [`ContentSource`] and [`RowWriter`] traits rather
//! than the concrete client, so resolver and service tests can script
//! outcomes, and an unconfigured deployment can swap in
//! [`UnconfiguredStore`] and keep serving bundled defaults.

pub mod client;
pub mod config;
pub mod error;
pub mod plan;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use steeple_types::{ContentRequest, RelatedKind};

pub use client::StoreClient;
pub use config::{STORE_KEY_ENV, STORE_URL_ENV, StoreConfig};
pub use error::StoreError;
pub use plan::{QueryPlan, read_plan, related_plan};

/// Read access to primary content rows and their related rows.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Read the rows a content request describes.
    async fn query(&self, request: &ContentRequest) -> Result<Vec<Value>, StoreError>;

    /// Read rows of a related kind for the given parent ids.
    async fn query_related(&self, kind: RelatedKind, parent_ids: &[String]) -> Result<Vec<Value>, StoreError>;
}

/// Insert access for submitted rows.
#[async_trait]
pub trait RowWriter: Send + Sync {
    /// Insert one row into a table and return the stored representation.
    async fn insert(&self, table: &str, row: &Value) -> Result<Value, StoreError>;
}

#[async_trait]
impl ContentSource for StoreClient {
    async fn query(&self, request: &ContentRequest) -> Result<Vec<Value>, StoreError> {
        let plan = plan::read_plan(request, Utc::now());
        self.read_rows(&plan).await
    }

    async fn query_related(&self, kind: RelatedKind, parent_ids: &[String]) -> Result<Vec<Value>, StoreError> {
        match plan::related_plan(kind, parent_ids) {
            Some(plan) => self.read_rows(&plan).await,
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl RowWriter for StoreClient {
    async fn insert(&self, table: &str, row: &Value) -> Result<Value, StoreError> {
        self.write_row(table, row).await
    }
}

/// Stand-in used when store credentials are absent.
///
/// Every call fails with [`StoreError::NotConfigured`], so reads degrade to
/// bundled defaults and writes surface a declined receipt instead of a panic.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredStore;

#[async_trait]
impl ContentSource for UnconfiguredStore {
    async fn query(&self, _request: &ContentRequest) -> Result<Vec<Value>, StoreError> {
        Err(StoreError::NotConfigured)
    }

    async fn query_related(&self, _kind: RelatedKind, _parent_ids: &[String]) -> Result<Vec<Value>, StoreError> {
        Err(StoreError::NotConfigured)
    }
}

#[async_trait]
impl RowWriter for UnconfiguredStore {
    async fn insert(&self, _table: &str, _row: &Value) -> Result<Value, StoreError> {
        Err(StoreError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use steeple_types::ContentKind;

    use super::*;

    #[tokio::test]
    async fn unconfigured_store_fails_every_call_with_not_configured() {
        let store = UnconfiguredStore;
        let request = ContentRequest::new(ContentKind::Events);

        assert!(matches!(store.query(&request).await, Err(StoreError::NotConfigured)));
        assert!(matches!(
            store.query_related(RelatedKind::EventImages, &["ev-1".into()]).await,
            Err(StoreError::NotConfigured)
        ));
        assert!(matches!(
            store.insert("contact_messages", &json!({"name": "Ada"})).await,
            Err(StoreError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn related_fetch_with_no_parents_skips_the_network() {
        let config = StoreConfig::new("http://localhost:54321", "service-key").expect("config");
        let client = StoreClient::new(config).expect("client");

        let rows = client
            .query_related(RelatedKind::MinistryLeaders, &[])
            .await
            .expect("no parents means no rows");
        assert!(rows.is_empty());
    }
}
