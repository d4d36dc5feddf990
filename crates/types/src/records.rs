//! Typed content records for every public resource kind.
//!
//! Rows arrive from the store as loose JSON and are decoded into these
//! structs; the bundled default payloads deserialize into the same types so
//! callers never see a different shape in degraded mode.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::giving::GivingFrequency;

/// A calendar event as rendered on the events and home pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    /// Event start, stored UTC
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    /// Filled by the image enrichment pass; absent rows render without art
    #[serde(default)]
    pub primary_image: Option<ImageRef>,
    /// Derived presentation string, e.g. "Sunday, June 8 • 10:00 AM"
    #[serde(default)]
    pub display_date: String,
}

/// A hosted image reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// One ministry directory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ministry {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub blurb: Option<String>,
    #[serde(default)]
    pub meeting_time: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Filled by the leader enrichment pass on detail reads
    #[serde(default)]
    pub leader: Option<LeaderContact>,
}

/// Contact card for a ministry leader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderContact {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Giving page content: copy plus the configured giving options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GivingPage {
    pub headline: String,
    pub intro: String,
    pub funds: Vec<Fund>,
    /// Suggested amounts in whole currency units
    pub suggested_amounts: Vec<u32>,
    pub frequencies: Vec<GivingFrequency>,
    #[serde(default)]
    pub note: Option<String>,
}

/// A fund a donation can be designated to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    /// Stable code carried into payment metadata (e.g. "general")
    pub code: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Tenant-wide settings rendered in the header, footer and contact page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub church_name: String,
    #[serde(default)]
    pub tagline: Option<String>,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Short line shown near the service schedule ("Nursery available")
    #[serde(default)]
    pub service_note: Option<String>,
    #[serde(default)]
    pub links: Vec<SiteLink>,
}

/// A labelled outbound link (socials, livestream, newsletter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteLink {
    pub label: String,
    pub url: String,
}

/// One row of the weekly service schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceTime {
    pub weekday: String,
    /// Local wall-clock time as displayed, e.g. "10:00 AM"
    pub time: String,
    pub label: String,
}

/// A sermon archive entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sermon {
    pub id: String,
    pub title: String,
    pub speaker: String,
    pub delivered_on: NaiveDate,
    #[serde(default)]
    pub scripture: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
}

/// A front-page announcement with an optional expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub body: String,
    pub posted_at: DateTime<Utc>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_row_decodes_without_enrichment_fields() {
        let json = r#"{
            "id": "4f5b",
            "title": "Community Picnic",
            "starts_at": "2026-06-08T17:00:00Z"
        }"#;

        let event: EventRecord = serde_json::from_str(json).expect("deserialize EventRecord");
        assert_eq!(event.title, "Community Picnic");
        assert!(event.primary_image.is_none());
        assert_eq!(event.display_date, "");
        assert!(event.ends_at.is_none());
    }

    #[test]
    fn ministry_row_decodes_without_leader() {
        let json = r#"{"id": "m1", "name": "Youth", "slug": "youth"}"#;
        let ministry: Ministry = serde_json::from_str(json).expect("deserialize Ministry");
        assert!(ministry.leader.is_none());
        assert!(ministry.blurb.is_none());
    }

    #[test]
    fn giving_page_round_trips() {
        let page = GivingPage {
            headline: "Generosity changes lives".into(),
            intro: "Your gift supports our mission.".into(),
            funds: vec![Fund {
                code: "general".into(),
                label: "General Fund".into(),
                description: None,
            }],
            suggested_amounts: vec![25, 50, 100],
            frequencies: vec![GivingFrequency::OneTime, GivingFrequency::Monthly],
            note: None,
        };

        let json = serde_json::to_string(&page).expect("serialize GivingPage");
        let back: GivingPage = serde_json::from_str(&json).expect("round-trip GivingPage");
        assert_eq!(back, page);
        assert!(json.contains(r#""one_time""#), "frequency wire form should be snake_case");
    }

    #[test]
    fn settings_default_links_to_empty() {
        let json = r#"{"church_name": "Grace Chapel", "address": "12 Hill Rd"}"#;
        let settings: SiteSettings = serde_json::from_str(json).expect("deserialize SiteSettings");
        assert!(settings.links.is_empty());
        assert!(settings.service_note.is_none());
    }
}
