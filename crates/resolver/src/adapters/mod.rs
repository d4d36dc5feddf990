//! Per-kind content adapters.
//!
//! Every resource kind plugs into the one resolution path through a
//! [`ContentAdapter`]: the kind it serves, a typed transform over fetched
//! rows, and the bundled default used when the fetch cannot deliver. Adding a
//! content kind means adding an adapter, not another resolution branch.

pub mod events;
pub mod ministries;
pub mod pages;
pub mod schedule;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use steeple_types::ContentKind;
use tracing::warn;

use crate::related::RelatedLookup;

pub use events::EventsAdapter;
pub use ministries::{MinistriesAdapter, MinistryDetailAdapter};
pub use pages::{GivingPageAdapter, SiteSettingsAdapter};
pub use schedule::{AnnouncementsAdapter, SermonsAdapter, ServiceTimesAdapter};

/// Strategy object for one content kind.
#[async_trait]
pub trait ContentAdapter: Send + Sync {
    /// Typed payload this adapter produces.
    type Output: Send;

    /// The kind this adapter serves.
    fn kind(&self) -> ContentKind;

    /// Turn fetched rows into the typed payload.
    ///
    /// May issue at most one related read through `related`; that read is
    /// already bounded and failure-absorbing, so the transform itself stays
    /// total.
    async fn transform(&self, rows: Vec<Value>, related: &RelatedLookup) -> Self::Output;

    /// Bundled default payload for this kind.
    fn fallback(&self) -> Self::Output;
}

/// Decode rows leniently: a row that fails to decode is skipped with a
/// warning rather than sinking the whole result set.
pub(crate) fn decode_rows<T: DeserializeOwned>(kind: ContentKind, rows: Vec<Value>) -> Vec<T> {
    let mut decoded = Vec::with_capacity(rows.len());
    for row in rows {
        match serde_json::from_value::<T>(row) {
            Ok(record) => decoded.push(record),
            Err(error) => warn!(kind = %kind, error = %error, "skipping undecodable row"),
        }
    }
    decoded
}

/// Decode the first row that decodes at all; `None` when no row does.
pub(crate) fn decode_first<T: DeserializeOwned>(kind: ContentKind, rows: Vec<Value>) -> Option<T> {
    decode_rows(kind, rows).into_iter().next()
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use steeple_types::ServiceTime;

    use super::*;

    #[test]
    fn decode_rows_skips_bad_rows_and_keeps_good_ones() {
        let rows = vec![
            json!({"weekday": "Sunday", "time": "9:00 AM", "label": "Classic Service"}),
            json!({"weekday": 7}),
            json!({"weekday": "Wednesday", "time": "7:00 PM", "label": "Midweek Prayer"}),
        ];

        let decoded: Vec<ServiceTime> = decode_rows(ContentKind::ServiceTimes, rows);
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[1].weekday, "Wednesday");
    }

    #[test]
    fn decode_first_finds_the_first_decodable_row() {
        let rows = vec![
            json!({"nope": true}),
            json!({"weekday": "Sunday", "time": "11:00 AM", "label": "Modern Service"}),
        ];

        let first: Option<ServiceTime> = decode_first(ContentKind::ServiceTimes, rows);
        assert_eq!(first.expect("one row decodes").time, "11:00 AM");
    }

    #[test]
    fn decode_first_is_none_when_nothing_decodes() {
        let rows = vec![json!({"nope": true}), json!(42)];
        let first: Option<ServiceTime> = decode_first(ContentKind::ServiceTimes, rows);
        assert!(first.is_none());
    }
}
