//! Single-row page content adapters: giving page and site settings.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use steeple_registry::DefaultPayloadRegistry;
use steeple_types::{ContentKind, GivingPage, SiteSettings};

use crate::adapters::{ContentAdapter, decode_first};
use crate::related::RelatedLookup;

pub struct GivingPageAdapter {
    defaults: Arc<DefaultPayloadRegistry>,
}

impl GivingPageAdapter {
    pub fn new(defaults: Arc<DefaultPayloadRegistry>) -> Self {
        Self { defaults }
    }
}

#[async_trait]
impl ContentAdapter for GivingPageAdapter {
    type Output = GivingPage;

    fn kind(&self) -> ContentKind {
        ContentKind::GivingPage
    }

    async fn transform(&self, rows: Vec<Value>, _related: &RelatedLookup) -> GivingPage {
        decode_first(self.kind(), rows).unwrap_or_else(|| self.fallback())
    }

    fn fallback(&self) -> GivingPage {
        self.defaults.giving_page().clone()
    }
}

pub struct SiteSettingsAdapter {
    defaults: Arc<DefaultPayloadRegistry>,
}

impl SiteSettingsAdapter {
    pub fn new(defaults: Arc<DefaultPayloadRegistry>) -> Self {
        Self { defaults }
    }
}

#[async_trait]
impl ContentAdapter for SiteSettingsAdapter {
    type Output = SiteSettings;

    fn kind(&self) -> ContentKind {
        ContentKind::SiteSettings
    }

    async fn transform(&self, rows: Vec<Value>, _related: &RelatedLookup) -> SiteSettings {
        decode_first(self.kind(), rows).unwrap_or_else(|| self.fallback())
    }

    fn fallback(&self) -> SiteSettings {
        self.defaults.site_settings().clone()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::json;
    use steeple_store::{ContentSource, StoreError};
    use steeple_types::{ContentRequest, RelatedKind};

    use super::*;

    fn registry() -> Arc<DefaultPayloadRegistry> {
        Arc::new(DefaultPayloadRegistry::embedded().expect("embedded bundle"))
    }

    struct NoRelated;

    #[async_trait]
    impl ContentSource for NoRelated {
        async fn query(&self, _request: &ContentRequest) -> Result<Vec<Value>, StoreError> {
            Ok(vec![])
        }

        async fn query_related(&self, _kind: RelatedKind, _parent_ids: &[String]) -> Result<Vec<Value>, StoreError> {
            Ok(vec![])
        }
    }

    fn lookup() -> RelatedLookup {
        RelatedLookup::new(Arc::new(NoRelated))
    }

    #[tokio::test]
    async fn giving_page_decodes_the_first_row() {
        let adapter = GivingPageAdapter::new(registry());
        let rows = vec![json!({
            "headline": "Give online",
            "intro": "Thank you for supporting the work.",
            "funds": [{"code": "general", "label": "General Fund"}],
            "suggested_amounts": [20, 40],
            "frequencies": ["one_time"]
        })];

        let page = adapter.transform(rows, &lookup()).await;
        assert_eq!(page.headline, "Give online");
        assert_eq!(page.funds.len(), 1);
    }

    #[tokio::test]
    async fn undecodable_page_row_falls_back_to_the_bundle() {
        let defaults = registry();
        let adapter = GivingPageAdapter::new(Arc::clone(&defaults));

        let page = adapter.transform(vec![json!({"headline": 42})], &lookup()).await;
        assert_eq!(&page, defaults.giving_page());
    }

    #[tokio::test]
    async fn settings_decode_with_optional_fields_missing() {
        let adapter = SiteSettingsAdapter::new(registry());
        let rows = vec![json!({"church_name": "Hope Chapel", "address": "9 Vine St"})];

        let settings = adapter.transform(rows, &lookup()).await;
        assert_eq!(settings.church_name, "Hope Chapel");
        assert!(settings.links.is_empty());
    }
}
