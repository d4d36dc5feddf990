//! Bounded secondary lookups.
//!
//! A transform may enrich its payload with one related read (event images,
//! ministry leaders). That read must never take the primary result down with
//! it: failures and timeouts collapse to `None`, the affected sub-fields stay
//! null, and the envelope keeps its `"database"` provenance.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use steeple_store::ContentSource;
use steeple_types::RelatedKind;
use tokio::time::timeout;
use tracing::warn;

/// Upper bound on one related read. Generous next to the store client's own
/// timeouts; it exists so a stuck proxy cannot stall a page render.
pub const RELATED_TIMEOUT: Duration = Duration::from_secs(3);

/// Failure-absorbing wrapper around [`ContentSource::query_related`].
pub struct RelatedLookup {
    source: Arc<dyn ContentSource>,
    timeout: Duration,
}

impl RelatedLookup {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self::with_timeout(source, RELATED_TIMEOUT)
    }

    pub fn with_timeout(source: Arc<dyn ContentSource>, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    /// Fetch related rows for a set of parent ids.
    ///
    /// `None` means the enrichment is unavailable, never that the caller
    /// should fail.
    pub async fn rows(&self, kind: RelatedKind, parent_ids: &[String]) -> Option<Vec<Value>> {
        match timeout(self.timeout, self.source.query_related(kind, parent_ids)).await {
            Ok(Ok(rows)) => Some(rows),
            Ok(Err(error)) => {
                warn!(related = %kind, error = %error, "related lookup failed, rendering without it");
                None
            }
            Err(_) => {
                warn!(
                    related = %kind,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "related lookup timed out, rendering without it"
                );
                None
            }
        }
    }
}
