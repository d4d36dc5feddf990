//! Schedule-shaped list adapters: service times, sermons, announcements.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use steeple_registry::DefaultPayloadRegistry;
use steeple_types::{Announcement, ContentKind, Sermon, ServiceTime};

use crate::adapters::{ContentAdapter, decode_rows};
use crate::related::RelatedLookup;

pub struct ServiceTimesAdapter {
    defaults: Arc<DefaultPayloadRegistry>,
}

impl ServiceTimesAdapter {
    pub fn new(defaults: Arc<DefaultPayloadRegistry>) -> Self {
        Self { defaults }
    }
}

#[async_trait]
impl ContentAdapter for ServiceTimesAdapter {
    type Output = Vec<ServiceTime>;

    fn kind(&self) -> ContentKind {
        ContentKind::ServiceTimes
    }

    async fn transform(&self, rows: Vec<Value>, _related: &RelatedLookup) -> Vec<ServiceTime> {
        decode_rows(self.kind(), rows)
    }

    fn fallback(&self) -> Vec<ServiceTime> {
        self.defaults.service_times().to_vec()
    }
}

pub struct SermonsAdapter {
    defaults: Arc<DefaultPayloadRegistry>,
}

impl SermonsAdapter {
    pub fn new(defaults: Arc<DefaultPayloadRegistry>) -> Self {
        Self { defaults }
    }
}

#[async_trait]
impl ContentAdapter for SermonsAdapter {
    type Output = Vec<Sermon>;

    fn kind(&self) -> ContentKind {
        ContentKind::Sermons
    }

    async fn transform(&self, rows: Vec<Value>, _related: &RelatedLookup) -> Vec<Sermon> {
        decode_rows(self.kind(), rows)
    }

    fn fallback(&self) -> Vec<Sermon> {
        self.defaults.sermons().to_vec()
    }
}

pub struct AnnouncementsAdapter {
    defaults: Arc<DefaultPayloadRegistry>,
}

impl AnnouncementsAdapter {
    pub fn new(defaults: Arc<DefaultPayloadRegistry>) -> Self {
        Self { defaults }
    }
}

#[async_trait]
impl ContentAdapter for AnnouncementsAdapter {
    type Output = Vec<Announcement>;

    fn kind(&self) -> ContentKind {
        ContentKind::Announcements
    }

    async fn transform(&self, rows: Vec<Value>, _related: &RelatedLookup) -> Vec<Announcement> {
        decode_rows(self.kind(), rows)
    }

    fn fallback(&self) -> Vec<Announcement> {
        self.defaults.announcements().to_vec()
    }
}
