//! Upcoming-events adapter: lenient decode, display-date derivation, and
//! primary-image enrichment.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use steeple_registry::DefaultPayloadRegistry;
use steeple_types::{ContentKind, EventRecord, ImageRef, RelatedKind};
use steeple_util::display_event_date;

use crate::adapters::{ContentAdapter, decode_rows};
use crate::related::RelatedLookup;

pub struct EventsAdapter {
    defaults: Arc<DefaultPayloadRegistry>,
}

impl EventsAdapter {
    pub fn new(defaults: Arc<DefaultPayloadRegistry>) -> Self {
        Self { defaults }
    }
}

#[async_trait]
impl ContentAdapter for EventsAdapter {
    type Output = Vec<EventRecord>;

    fn kind(&self) -> ContentKind {
        ContentKind::Events
    }

    async fn transform(&self, rows: Vec<Value>, related: &RelatedLookup) -> Vec<EventRecord> {
        let mut events: Vec<EventRecord> = decode_rows(self.kind(), rows);
        for event in &mut events {
            event.display_date = display_event_date(&event.starts_at);
        }

        if !events.is_empty() {
            let ids: Vec<String> = events.iter().map(|event| event.id.clone()).collect();
            if let Some(image_rows) = related.rows(RelatedKind::EventImages, &ids).await {
                attach_primary_images(&mut events, &image_rows);
            }
        }
        events
    }

    fn fallback(&self) -> Vec<EventRecord> {
        self.defaults.events().to_vec()
    }
}

/// Pick one image per event: the first row flagged `is_primary`, else the
/// first row for that event. Events with no image row keep `primary_image`
/// null.
fn attach_primary_images(events: &mut [EventRecord], image_rows: &[Value]) {
    for event in events.iter_mut() {
        let mut chosen: Option<ImageRef> = None;
        for row in image_rows
            .iter()
            .filter(|row| row.get("event_id").and_then(Value::as_str) == Some(event.id.as_str()))
        {
            let Some(url) = row.get("url").and_then(Value::as_str) else {
                continue;
            };
            let image = ImageRef {
                url: url.to_string(),
                alt: row.get("alt").and_then(Value::as_str).map(str::to_string),
            };
            if row.get("is_primary").and_then(Value::as_bool).unwrap_or(false) {
                chosen = Some(image);
                break;
            }
            if chosen.is_none() {
                chosen = Some(image);
            }
        }
        if chosen.is_some() {
            event.primary_image = chosen;
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use steeple_store::{ContentSource, StoreError};
    use steeple_types::{ContentRequest, RelatedKind};

    use super::*;

    fn registry() -> Arc<DefaultPayloadRegistry> {
        Arc::new(DefaultPayloadRegistry::embedded().expect("embedded bundle"))
    }

    /// Source whose related reads are scripted; primary reads are unused here.
    struct RelatedScript {
        related: Result<Vec<Value>, StoreError>,
    }

    #[async_trait]
    impl ContentSource for RelatedScript {
        async fn query(&self, _request: &ContentRequest) -> Result<Vec<Value>, StoreError> {
            Ok(vec![])
        }

        async fn query_related(&self, _kind: RelatedKind, _parent_ids: &[String]) -> Result<Vec<Value>, StoreError> {
            match &self.related {
                Ok(rows) => Ok(rows.clone()),
                Err(error) => Err(StoreError::Transport(error.to_string())),
            }
        }
    }

    fn lookup_with(related: Result<Vec<Value>, StoreError>) -> RelatedLookup {
        RelatedLookup::new(Arc::new(RelatedScript { related }))
    }

    fn event_rows() -> Vec<Value> {
        vec![
            json!({"id": "ev-1", "title": "Worship Night", "starts_at": "2026-09-06T19:00:00Z"}),
            json!({"id": "ev-2", "title": "Food Drive", "starts_at": "2026-10-03T09:00:00Z"}),
        ]
    }

    #[tokio::test]
    async fn derives_display_dates_for_live_rows() {
        let adapter = EventsAdapter::new(registry());
        let events = adapter.transform(event_rows(), &lookup_with(Ok(vec![]))).await;

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].display_date, "Sunday, September 6 • 7:00 PM");
        assert_eq!(events[1].display_date, "Saturday, October 3 • 9:00 AM");
    }

    #[tokio::test]
    async fn attaches_primary_images_preferring_the_flag() {
        let adapter = EventsAdapter::new(registry());
        let images = vec![
            json!({"event_id": "ev-1", "url": "/a.jpg", "is_primary": false}),
            json!({"event_id": "ev-1", "url": "/b.jpg", "alt": "Band on stage", "is_primary": true}),
            json!({"event_id": "ev-2", "url": "/c.jpg"}),
        ];

        let events = adapter.transform(event_rows(), &lookup_with(Ok(images))).await;

        let first = events[0].primary_image.as_ref().expect("image for ev-1");
        assert_eq!(first.url, "/b.jpg");
        assert_eq!(first.alt.as_deref(), Some("Band on stage"));

        let second = events[1].primary_image.as_ref().expect("image for ev-2");
        assert_eq!(second.url, "/c.jpg");
        assert!(second.alt.is_none());
    }

    #[tokio::test]
    async fn failed_image_lookup_leaves_events_without_art() {
        let adapter = EventsAdapter::new(registry());
        let events = adapter
            .transform(event_rows(), &lookup_with(Err(StoreError::Transport("reset".into()))))
            .await;

        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|event| event.primary_image.is_none()));
    }

    #[tokio::test]
    async fn undecodable_rows_are_skipped() {
        let adapter = EventsAdapter::new(registry());
        let mut rows = event_rows();
        rows.push(json!({"id": "ev-3"}));

        let events = adapter.transform(rows, &lookup_with(Ok(vec![]))).await;
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn fallback_is_the_bundled_default() {
        let defaults = registry();
        let adapter = EventsAdapter::new(Arc::clone(&defaults));
        assert_eq!(adapter.fallback(), defaults.events());
    }
}
