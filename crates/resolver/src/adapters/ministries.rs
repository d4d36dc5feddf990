//! Ministry directory and detail adapters.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use steeple_registry::DefaultPayloadRegistry;
use steeple_types::{ContentKind, LeaderContact, Ministry, RelatedKind};

use crate::adapters::{ContentAdapter, decode_first, decode_rows};
use crate::related::RelatedLookup;

pub struct MinistriesAdapter {
    defaults: Arc<DefaultPayloadRegistry>,
}

impl MinistriesAdapter {
    pub fn new(defaults: Arc<DefaultPayloadRegistry>) -> Self {
        Self { defaults }
    }
}

#[async_trait]
impl ContentAdapter for MinistriesAdapter {
    type Output = Vec<Ministry>;

    fn kind(&self) -> ContentKind {
        ContentKind::Ministries
    }

    async fn transform(&self, rows: Vec<Value>, _related: &RelatedLookup) -> Vec<Ministry> {
        decode_rows(self.kind(), rows)
    }

    fn fallback(&self) -> Vec<Ministry> {
        self.defaults.ministries().to_vec()
    }
}

/// Single-ministry adapter; enriches the row with its leader contact.
pub struct MinistryDetailAdapter {
    defaults: Arc<DefaultPayloadRegistry>,
}

impl MinistryDetailAdapter {
    pub fn new(defaults: Arc<DefaultPayloadRegistry>) -> Self {
        Self { defaults }
    }
}

#[async_trait]
impl ContentAdapter for MinistryDetailAdapter {
    type Output = Ministry;

    fn kind(&self) -> ContentKind {
        ContentKind::MinistryDetail
    }

    async fn transform(&self, rows: Vec<Value>, related: &RelatedLookup) -> Ministry {
        // The fetch succeeded; when the row itself is unusable the bundled
        // placeholder stands in without re-tagging the envelope.
        let Some(mut ministry) = decode_first::<Ministry>(self.kind(), rows) else {
            return self.fallback();
        };

        let ids = vec![ministry.id.clone()];
        if let Some(leader_rows) = related.rows(RelatedKind::MinistryLeaders, &ids).await {
            ministry.leader = leader_rows
                .iter()
                .find_map(|row| serde_json::from_value::<LeaderContact>(row.clone()).ok());
        }
        ministry
    }

    fn fallback(&self) -> Ministry {
        self.defaults.ministry_detail().clone()
    }
}
