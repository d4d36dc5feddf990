//! The public content surface.
//!
//! `SiteContent` owns one resolver and one defaults registry and exposes a
//! typed operation per resource kind. Handlers hold it for the life of the
//! process; every method is total and async-safe to call concurrently.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use steeple_registry::DefaultPayloadRegistry;
use steeple_store::ContentSource;
use steeple_types::{
    Announcement, ContentKind, ContentRequest, EventRecord, GivingPage, Ministry, ResolvedContent, Sermon,
    ServiceTime, SiteSettings,
};

use crate::adapters::{
    AnnouncementsAdapter, EventsAdapter, GivingPageAdapter, MinistriesAdapter, MinistryDetailAdapter, SermonsAdapter,
    ServiceTimesAdapter, SiteSettingsAdapter,
};
use crate::fetcher::StoreFetcher;
use crate::related::RelatedLookup;
use crate::resolver::FallbackResolver;

pub struct SiteContent {
    resolver: FallbackResolver,
    defaults: Arc<DefaultPayloadRegistry>,
}

impl SiteContent {
    /// Wire the facade to a content source and a defaults registry.
    ///
    /// Both are constructed once at startup; the facade itself holds no
    /// mutable state.
    pub fn new(source: Arc<dyn ContentSource>, defaults: Arc<DefaultPayloadRegistry>) -> Self {
        let fetcher = StoreFetcher::new(Arc::clone(&source));
        let resolver = FallbackResolver::new(Arc::new(fetcher), RelatedLookup::new(source));
        Self { resolver, defaults }
    }

    pub fn defaults(&self) -> &DefaultPayloadRegistry {
        &self.defaults
    }

    pub async fn upcoming_events(&self, limit: Option<usize>) -> ResolvedContent<Vec<EventRecord>> {
        let mut request = ContentRequest::new(ContentKind::Events);
        if let Some(limit) = limit {
            request = request.with_limit(limit);
        }
        let adapter = EventsAdapter::new(Arc::clone(&self.defaults));
        self.resolver.resolve(&adapter, request).await
    }

    pub async fn ministries(&self) -> ResolvedContent<Vec<Ministry>> {
        let adapter = MinistriesAdapter::new(Arc::clone(&self.defaults));
        self.resolver.resolve(&adapter, ContentRequest::new(ContentKind::Ministries)).await
    }

    pub async fn ministry(&self, slug: &str) -> ResolvedContent<Ministry> {
        let request = ContentRequest::new(ContentKind::MinistryDetail).with_slug(slug);
        let adapter = MinistryDetailAdapter::new(Arc::clone(&self.defaults));
        self.resolver.resolve(&adapter, request).await
    }

    pub async fn giving_page(&self) -> ResolvedContent<GivingPage> {
        let adapter = GivingPageAdapter::new(Arc::clone(&self.defaults));
        self.resolver.resolve(&adapter, ContentRequest::new(ContentKind::GivingPage)).await
    }

    pub async fn site_settings(&self) -> ResolvedContent<SiteSettings> {
        let adapter = SiteSettingsAdapter::new(Arc::clone(&self.defaults));
        self.resolver.resolve(&adapter, ContentRequest::new(ContentKind::SiteSettings)).await
    }

    pub async fn service_times(&self) -> ResolvedContent<Vec<ServiceTime>> {
        let adapter = ServiceTimesAdapter::new(Arc::clone(&self.defaults));
        self.resolver.resolve(&adapter, ContentRequest::new(ContentKind::ServiceTimes)).await
    }

    pub async fn sermons(&self, limit: Option<usize>) -> ResolvedContent<Vec<Sermon>> {
        let mut request = ContentRequest::new(ContentKind::Sermons);
        if let Some(limit) = limit {
            request = request.with_limit(limit);
        }
        let adapter = SermonsAdapter::new(Arc::clone(&self.defaults));
        self.resolver.resolve(&adapter, request).await
    }

    pub async fn announcements(&self) -> ResolvedContent<Vec<Announcement>> {
        let adapter = AnnouncementsAdapter::new(Arc::clone(&self.defaults));
        self.resolver.resolve(&adapter, ContentRequest::new(ContentKind::Announcements)).await
    }

    /// Resolve any kind to its JSON envelope.
    ///
    /// A detail kind with no slug resolves like a miss: the store finds no
    /// row and the bundled default answers.
    pub async fn resolve_json(
        &self,
        kind: ContentKind,
        slug: Option<&str>,
        limit: Option<usize>,
    ) -> ResolvedContent<Value> {
        match kind {
            ContentKind::Events => to_json(self.upcoming_events(limit).await),
            ContentKind::Ministries => to_json(self.ministries().await),
            ContentKind::MinistryDetail => to_json(self.ministry(slug.unwrap_or_default()).await),
            ContentKind::GivingPage => to_json(self.giving_page().await),
            ContentKind::SiteSettings => to_json(self.site_settings().await),
            ContentKind::ServiceTimes => to_json(self.service_times().await),
            ContentKind::Sermons => to_json(self.sermons(limit).await),
            ContentKind::Announcements => to_json(self.announcements().await),
        }
    }
}

fn to_json<T: Serialize>(resolved: ResolvedContent<T>) -> ResolvedContent<Value> {
    resolved.map(|data| serde_json::to_value(data).unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::json;
    use steeple_store::{StoreError, UnconfiguredStore};
    use steeple_types::{Provenance, RelatedKind};

    use super::*;

    fn registry() -> Arc<DefaultPayloadRegistry> {
        Arc::new(DefaultPayloadRegistry::embedded().expect("embedded bundle"))
    }

    /// Store stand-in with independently scripted primary and related reads.
    struct ScriptedStore {
        primary: Result<Vec<Value>, String>,
        related: Result<Vec<Value>, String>,
    }

    impl ScriptedStore {
        fn with_rows(rows: Vec<Value>) -> Self {
            Self {
                primary: Ok(rows),
                related: Ok(vec![]),
            }
        }

        fn unreachable() -> Self {
            Self {
                primary: Err("connection refused".into()),
                related: Err("connection refused".into()),
            }
        }
    }

    #[async_trait]
    impl ContentSource for ScriptedStore {
        async fn query(&self, _request: &ContentRequest) -> Result<Vec<Value>, StoreError> {
            match &self.primary {
                Ok(rows) => Ok(rows.clone()),
                Err(reason) => Err(StoreError::Transport(reason.clone())),
            }
        }

        async fn query_related(&self, _kind: RelatedKind, _parent_ids: &[String]) -> Result<Vec<Value>, StoreError> {
            match &self.related {
                Ok(rows) => Ok(rows.clone()),
                Err(reason) => Err(StoreError::Transport(reason.clone())),
            }
        }
    }

    #[tokio::test]
    async fn unreachable_store_serves_the_four_bundled_events() {
        let defaults = registry();
        let site = SiteContent::new(Arc::new(ScriptedStore::unreachable()), Arc::clone(&defaults));

        let resolved = site.upcoming_events(None).await;

        assert_eq!(resolved.source, Provenance::Default);
        assert_eq!(resolved.data.len(), 4);
        assert_eq!(resolved.data, defaults.events());
    }

    #[tokio::test]
    async fn empty_result_set_equals_the_bundled_default_exactly() {
        let defaults = registry();
        let site = SiteContent::new(Arc::new(ScriptedStore::with_rows(vec![])), Arc::clone(&defaults));

        let resolved = site.giving_page().await;

        assert_eq!(resolved.source, Provenance::Default);
        assert_eq!(resolved.message, "No records found");
        assert_eq!(&resolved.data, defaults.giving_page());
    }

    #[tokio::test]
    async fn live_events_come_back_enriched_and_tagged_database() {
        let store = ScriptedStore {
            primary: Ok(vec![
                json!({"id": "ev-1", "title": "Worship Night", "starts_at": "2026-09-06T19:00:00Z"}),
                json!({"id": "ev-2", "title": "Food Drive", "starts_at": "2026-10-03T09:00:00Z"}),
            ]),
            related: Ok(vec![json!({"event_id": "ev-1", "url": "/stage.jpg", "is_primary": true})]),
        };
        let site = SiteContent::new(Arc::new(store), registry());

        let resolved = site.upcoming_events(Some(5)).await;

        assert_eq!(resolved.source, Provenance::Database);
        assert_eq!(resolved.message, "Loaded 2 records");
        assert_eq!(resolved.data.len(), 2);
        assert_eq!(
            resolved.data[0].primary_image.as_ref().map(|image| image.url.as_str()),
            Some("/stage.jpg")
        );
        assert!(resolved.data[1].primary_image.is_none());
        assert!(!resolved.data[0].display_date.is_empty());
    }

    #[tokio::test]
    async fn failed_image_lookup_does_not_degrade_the_envelope() {
        let store = ScriptedStore {
            primary: Ok(vec![json!({"id": "ev-1", "title": "Worship Night", "starts_at": "2026-09-06T19:00:00Z"})]),
            related: Err("related backend down".into()),
        };
        let site = SiteContent::new(Arc::new(store), registry());

        let resolved = site.upcoming_events(None).await;

        assert_eq!(resolved.source, Provenance::Database);
        assert!(resolved.data[0].primary_image.is_none());
    }

    #[tokio::test]
    async fn every_kind_resolves_without_configuration() {
        let site = SiteContent::new(Arc::new(UnconfiguredStore), registry());

        for kind in ContentKind::ALL {
            let resolved = site.resolve_json(kind, None, None).await;
            assert_eq!(resolved.source, Provenance::Default, "kind {kind}");
            assert_eq!(resolved.message, "configuration missing", "kind {kind}");
            assert!(!resolved.data.is_null(), "kind {kind} must carry data");
        }
    }

    #[tokio::test]
    async fn default_payloads_equal_the_registry_json() {
        let defaults = registry();
        let site = SiteContent::new(Arc::new(UnconfiguredStore), Arc::clone(&defaults));

        for kind in ContentKind::ALL {
            let resolved = site.resolve_json(kind, None, None).await;
            assert_eq!(&resolved.data, defaults.payload(kind), "kind {kind}");
        }
    }

    #[tokio::test]
    async fn resolution_is_idempotent_for_an_unchanged_store() {
        let site = SiteContent::new(
            Arc::new(ScriptedStore::with_rows(vec![json!({
                "id": "m-1", "name": "Kids", "slug": "kids"
            })])),
            registry(),
        );

        let first = site.resolve_json(ContentKind::Ministries, None, None).await;
        let second = site.resolve_json(ContentKind::Ministries, None, None).await;

        assert_eq!(first.data, second.data);
        assert_eq!(first.source, second.source);
        assert_eq!(first.message, second.message);
    }

    #[tokio::test]
    async fn detail_kind_without_slug_still_answers() {
        let site = SiteContent::new(Arc::new(ScriptedStore::with_rows(vec![])), registry());

        let resolved = site.resolve_json(ContentKind::MinistryDetail, None, None).await;
        assert_eq!(resolved.source, Provenance::Default);
        assert_eq!(resolved.data["name"], "Ministry Details Coming Soon");
    }
}
