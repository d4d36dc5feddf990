//! Bundled default payloads for every content kind.
//!
//! This crate is the substance behind the fallback contract: when the live
//! store cannot serve a request, the resolver answers with the payload held
//! here. The bundle is embedded at compile time, optionally replaced once at
//! startup by an operator override file, validated, and then shared read-only
//! behind an `Arc` for the life of the process.

pub mod config;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use steeple_types::{
    Announcement, ContentKind, EventRecord, GivingPage, Ministry, Sermon, ServiceTime, SiteSettings,
};
use thiserror::Error;
use tracing::{info, warn};

pub use config::{DEFAULTS_PATH_ENV, defaults_path};

const EVENTS_JSON: &str = include_str!("../defaults/events.json");
const MINISTRIES_JSON: &str = include_str!("../defaults/ministries.json");
const MINISTRY_DETAIL_JSON: &str = include_str!("../defaults/ministry-detail.json");
const GIVING_PAGE_JSON: &str = include_str!("../defaults/giving-page.json");
const SITE_SETTINGS_JSON: &str = include_str!("../defaults/site-settings.json");
const SERVICE_TIMES_JSON: &str = include_str!("../defaults/service-times.json");
const SERMONS_JSON: &str = include_str!("../defaults/sermons.json");
const ANNOUNCEMENTS_JSON: &str = include_str!("../defaults/announcements.json");

/// Failure to assemble a usable defaults bundle.
#[derive(Debug, Error)]
pub enum DefaultsError {
    #[error("defaults file {path} could not be read: {reason}")]
    Read { path: String, reason: String },
    #[error("defaults payload invalid: {0}")]
    Invalid(String),
}

/// The full typed bundle, one payload per content kind.
///
/// Field names serialize in kebab-case, so an operator override file uses the
/// same keys the CLI prints for kind names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DefaultPayloads {
    pub events: Vec<EventRecord>,
    pub ministries: Vec<Ministry>,
    pub ministry_detail: Ministry,
    pub giving_page: GivingPage,
    pub site_settings: SiteSettings,
    pub service_times: Vec<ServiceTime>,
    pub sermons: Vec<Sermon>,
    pub announcements: Vec<Announcement>,
}

impl DefaultPayloads {
    /// Parse the bundle embedded at compile time.
    pub fn embedded() -> Result<Self, DefaultsError> {
        Ok(Self {
            events: parse_part("events", EVENTS_JSON)?,
            ministries: parse_part("ministries", MINISTRIES_JSON)?,
            ministry_detail: parse_part("ministry-detail", MINISTRY_DETAIL_JSON)?,
            giving_page: parse_part("giving-page", GIVING_PAGE_JSON)?,
            site_settings: parse_part("site-settings", SITE_SETTINGS_JSON)?,
            service_times: parse_part("service-times", SERVICE_TIMES_JSON)?,
            sermons: parse_part("sermons", SERMONS_JSON)?,
            announcements: parse_part("announcements", ANNOUNCEMENTS_JSON)?,
        })
    }
}

fn parse_part<T: serde::de::DeserializeOwned>(kind: &str, raw: &str) -> Result<T, DefaultsError> {
    serde_json::from_str(raw).map_err(|error| DefaultsError::Invalid(format!("{kind}: {error}")))
}

/// Immutable kind → payload mapping, constructed once at startup.
#[derive(Debug, Clone)]
pub struct DefaultPayloadRegistry {
    payloads: DefaultPayloads,
    by_kind: IndexMap<ContentKind, Value>,
}

static NULL_PAYLOAD: Value = Value::Null;

impl DefaultPayloadRegistry {
    /// Registry over the compile-time bundle.
    pub fn embedded() -> Result<Self, DefaultsError> {
        Self::from_bundle(DefaultPayloads::embedded()?)
    }

    /// Registry over the configured bundle: the override file when present
    /// and usable, the embedded bundle otherwise.
    ///
    /// An unusable override is logged and skipped rather than refused; the
    /// site must come up with working defaults either way.
    pub fn from_config() -> Result<Self, DefaultsError> {
        let path = config::defaults_path();
        if path.exists() {
            match config::load_override(&path).and_then(Self::from_bundle) {
                Ok(registry) => {
                    info!(path = %path.display(), "loaded defaults override");
                    return Ok(registry);
                }
                Err(error) => {
                    warn!(path = %path.display(), error = %error, "defaults override unusable, using embedded bundle");
                }
            }
        }
        Self::embedded()
    }

    /// Validate a bundle and precompute the per-kind JSON payloads.
    pub fn from_bundle(payloads: DefaultPayloads) -> Result<Self, DefaultsError> {
        validate(&payloads)?;
        let mut by_kind = IndexMap::with_capacity(ContentKind::ALL.len());
        for kind in ContentKind::ALL {
            by_kind.insert(kind, payload_value(&payloads, kind)?);
        }
        Ok(Self { payloads, by_kind })
    }

    /// The default payload for a kind, in the JSON form the envelope carries.
    ///
    /// Total: `by_kind` is built over every kind at construction.
    pub fn payload(&self, kind: ContentKind) -> &Value {
        self.by_kind.get(&kind).unwrap_or(&NULL_PAYLOAD)
    }

    /// The whole typed bundle.
    pub fn bundle(&self) -> &DefaultPayloads {
        &self.payloads
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.payloads.events
    }

    pub fn ministries(&self) -> &[Ministry] {
        &self.payloads.ministries
    }

    pub fn ministry_detail(&self) -> &Ministry {
        &self.payloads.ministry_detail
    }

    pub fn giving_page(&self) -> &GivingPage {
        &self.payloads.giving_page
    }

    pub fn site_settings(&self) -> &SiteSettings {
        &self.payloads.site_settings
    }

    pub fn service_times(&self) -> &[ServiceTime] {
        &self.payloads.service_times
    }

    pub fn sermons(&self) -> &[Sermon] {
        &self.payloads.sermons
    }

    pub fn announcements(&self) -> &[Announcement] {
        &self.payloads.announcements
    }
}

fn payload_value(payloads: &DefaultPayloads, kind: ContentKind) -> Result<Value, DefaultsError> {
    let value = match kind {
        ContentKind::Events => serde_json::to_value(&payloads.events),
        ContentKind::Ministries => serde_json::to_value(&payloads.ministries),
        ContentKind::MinistryDetail => serde_json::to_value(&payloads.ministry_detail),
        ContentKind::GivingPage => serde_json::to_value(&payloads.giving_page),
        ContentKind::SiteSettings => serde_json::to_value(&payloads.site_settings),
        ContentKind::ServiceTimes => serde_json::to_value(&payloads.service_times),
        ContentKind::Sermons => serde_json::to_value(&payloads.sermons),
        ContentKind::Announcements => serde_json::to_value(&payloads.announcements),
    };
    value.map_err(|error| DefaultsError::Invalid(format!("{kind}: {error}")))
}

fn validate(payloads: &DefaultPayloads) -> Result<(), DefaultsError> {
    fn require(condition: bool, what: &str) -> Result<(), DefaultsError> {
        if condition {
            Ok(())
        } else {
            Err(DefaultsError::Invalid(what.to_string()))
        }
    }

    require(!payloads.events.is_empty(), "events must not be empty")?;
    require(!payloads.ministries.is_empty(), "ministries must not be empty")?;
    require(!payloads.service_times.is_empty(), "service-times must not be empty")?;
    require(!payloads.sermons.is_empty(), "sermons must not be empty")?;
    require(!payloads.announcements.is_empty(), "announcements must not be empty")?;
    require(!payloads.giving_page.funds.is_empty(), "giving-page must list at least one fund")?;
    require(
        !payloads.site_settings.church_name.trim().is_empty(),
        "site-settings church_name must be set",
    )?;
    require(
        !payloads.ministry_detail.name.trim().is_empty(),
        "ministry-detail name must be set",
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use steeple_util::display_event_date;

    use super::*;

    #[test]
    fn embedded_bundle_loads_and_validates() {
        let registry = DefaultPayloadRegistry::embedded().expect("embedded bundle");
        assert_eq!(registry.events().len(), 4);
        assert_eq!(registry.ministries().len(), 4);
        assert_eq!(registry.service_times().len(), 3);
        assert_eq!(registry.sermons().len(), 2);
        assert_eq!(registry.announcements().len(), 1);
    }

    #[test]
    fn every_kind_has_a_payload() {
        let registry = DefaultPayloadRegistry::embedded().expect("embedded bundle");
        for kind in ContentKind::ALL {
            assert!(!registry.payload(kind).is_null(), "kind {kind} must have a payload");
        }
    }

    #[test]
    fn payloads_match_their_typed_form() {
        let registry = DefaultPayloadRegistry::embedded().expect("embedded bundle");
        assert_eq!(
            registry.payload(ContentKind::Events),
            &serde_json::to_value(registry.events()).expect("events to JSON")
        );
        assert_eq!(
            registry.payload(ContentKind::SiteSettings),
            &serde_json::to_value(registry.site_settings()).expect("settings to JSON")
        );
    }

    #[test]
    fn bundled_event_display_dates_match_their_timestamps() {
        let registry = DefaultPayloadRegistry::embedded().expect("embedded bundle");
        for event in registry.events() {
            assert_eq!(
                event.display_date,
                display_event_date(&event.starts_at),
                "event {} carries a stale display_date",
                event.id
            );
        }
    }

    #[test]
    fn bundled_ids_and_slugs_are_unique() {
        let registry = DefaultPayloadRegistry::embedded().expect("embedded bundle");

        let mut event_ids = HashSet::new();
        for event in registry.events() {
            assert!(event_ids.insert(&event.id), "duplicate event id {}", event.id);
        }

        let mut slugs = HashSet::new();
        for ministry in registry.ministries() {
            assert!(slugs.insert(&ministry.slug), "duplicate ministry slug {}", ministry.slug);
        }
    }

    #[test]
    fn empty_events_bundle_is_rejected() {
        let mut bundle = DefaultPayloads::embedded().expect("embedded bundle");
        bundle.events.clear();

        let error = DefaultPayloadRegistry::from_bundle(bundle).expect_err("must reject");
        assert!(matches!(error, DefaultsError::Invalid(_)), "got {error:?}");
    }

    #[test]
    fn blank_church_name_is_rejected() {
        let mut bundle = DefaultPayloads::embedded().expect("embedded bundle");
        bundle.site_settings.church_name = "  ".into();

        assert!(DefaultPayloadRegistry::from_bundle(bundle).is_err());
    }
}
