//! Source fetching and outcome classification.
//!
//! The fetcher is the only component that talks to the store on the read
//! path, and it never returns an error: every way a read can go wrong is
//! folded into a [`FetchOutcome`] variant for the resolver to branch on.

use std::sync::Arc;

use async_trait::async_trait;
use steeple_store::{ContentSource, StoreError};
use steeple_types::{ContentRequest, FetchOutcome};
use tracing::debug;

/// Message used whenever the store client itself is not usable.
///
/// Dashboards and callers match on this exact string, so classification keeps
/// it stable across the unconfigured and misconfigured paths.
pub const CONFIGURATION_MISSING: &str = "configuration missing";

/// One classified read against the live source.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Perform exactly one remote read and classify the result.
    ///
    /// No retries, no mutation, no error return.
    async fn fetch(&self, request: &ContentRequest) -> FetchOutcome;
}

/// [`SourceFetcher`] backed by a [`ContentSource`].
pub struct StoreFetcher {
    source: Arc<dyn ContentSource>,
}

impl StoreFetcher {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl SourceFetcher for StoreFetcher {
    async fn fetch(&self, request: &ContentRequest) -> FetchOutcome {
        let outcome = match self.source.query(request).await {
            Ok(rows) if rows.is_empty() => FetchOutcome::Empty,
            Ok(rows) => FetchOutcome::Success(rows),
            Err(error) => classify(error),
        };
        debug!(kind = %request.kind, outcome = outcome.label(), "fetch classified");
        outcome
    }
}

/// Map a store failure onto the closed outcome set.
fn classify(error: StoreError) -> FetchOutcome {
    let reason = error.to_string();
    match error {
        StoreError::NotConfigured | StoreError::InvalidBaseUrl { .. } => {
            FetchOutcome::TransientFailure(CONFIGURATION_MISSING.to_string())
        }
        StoreError::Transport(_) => FetchOutcome::TransientFailure(reason),
        StoreError::PolicyDenied(_) => FetchOutcome::PolicyRejected(reason),
        StoreError::UnexpectedStatus { .. } | StoreError::Decode(_) | StoreError::Conflict(_) => {
            FetchOutcome::UnexpectedError(reason)
        }
    }
}
