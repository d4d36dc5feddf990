//! The fallback resolution path.
//!
//! One generic `resolve` covers every content kind: fetch once, classify,
//! then either transform live rows or substitute the adapter's bundled
//! default. The return type has no error arm; whatever happens upstream, the
//! caller gets usable data plus a provenance tag.

use std::sync::Arc;

use steeple_types::{ContentRequest, FetchOutcome, ResolvedContent};
use tracing::{error, warn};

use crate::adapters::ContentAdapter;
use crate::fetcher::SourceFetcher;
use crate::related::RelatedLookup;

/// Message paired with the `"default"` provenance on an empty result set.
pub const NO_RECORDS_FOUND: &str = "No records found";

/// Resolves content requests against a fetcher, falling back per adapter.
pub struct FallbackResolver {
    fetcher: Arc<dyn SourceFetcher>,
    related: RelatedLookup,
}

impl FallbackResolver {
    pub fn new(fetcher: Arc<dyn SourceFetcher>, related: RelatedLookup) -> Self {
        Self { fetcher, related }
    }

    /// Resolve one request through the given adapter.
    ///
    /// Total over every [`FetchOutcome`]; the match is exhaustive on purpose
    /// so a new outcome variant cannot silently fall into a catch-all.
    pub async fn resolve<A: ContentAdapter>(&self, adapter: &A, request: ContentRequest) -> ResolvedContent<A::Output> {
        let kind = adapter.kind();
        match self.fetcher.fetch(&request).await {
            FetchOutcome::Success(rows) => {
                let fetched = rows.len();
                let data = adapter.transform(rows, &self.related).await;
                ResolvedContent::database(data, fetched)
            }
            FetchOutcome::Empty => ResolvedContent::default_payload(adapter.fallback(), NO_RECORDS_FOUND),
            FetchOutcome::TransientFailure(reason) => {
                warn!(kind = %kind, reason = %reason, "store unavailable, serving default payload");
                ResolvedContent::default_payload(adapter.fallback(), reason)
            }
            FetchOutcome::PolicyRejected(reason) => {
                warn!(kind = %kind, reason = %reason, "store refused the read, serving default payload");
                ResolvedContent::default_payload(adapter.fallback(), reason)
            }
            FetchOutcome::UnexpectedError(reason) => {
                error!(kind = %kind, reason = %reason, "unexpected store failure, serving default payload");
                ResolvedContent::error_fallback(adapter.fallback(), reason)
            }
        }
    }
}
