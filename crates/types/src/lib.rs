use std::{error::Error, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod forms;
pub mod giving;
pub mod records;

pub use forms::{ContactMessage, PlannedVisit, SubmissionReceipt};
pub use giving::{DonationRequest, GivingFrequency, PaymentIntent};
pub use records::{
    Announcement, EventRecord, Fund, GivingPage, ImageRef, LeaderContact, Ministry, Sermon, ServiceTime, SiteLink,
    SiteSettings,
};

/// Logical content category served by the site.
///
/// Every public read resolves exactly one kind; the kind also selects the
/// bundled default payload used when the live store cannot serve the request.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    /// Upcoming calendar events shown on the home and events pages
    Events,
    /// Ministry directory listing
    Ministries,
    /// A single ministry looked up by slug
    MinistryDetail,
    /// Giving page content: funds, suggested amounts, frequencies
    GivingPage,
    /// Tenant-wide settings: church name, address, contact details
    SiteSettings,
    /// Weekly service schedule
    ServiceTimes,
    /// Recent sermon archive entries
    Sermons,
    /// Active front-page announcements
    Announcements,
}

impl ContentKind {
    /// Every kind, in the order the CLI and registry report them.
    pub const ALL: [ContentKind; 8] = [
        ContentKind::Events,
        ContentKind::Ministries,
        ContentKind::MinistryDetail,
        ContentKind::GivingPage,
        ContentKind::SiteSettings,
        ContentKind::ServiceTimes,
        ContentKind::Sermons,
        ContentKind::Announcements,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Events => "events",
            Self::Ministries => "ministries",
            Self::MinistryDetail => "ministry-detail",
            Self::GivingPage => "giving-page",
            Self::SiteSettings => "site-settings",
            Self::ServiceTimes => "service-times",
            Self::Sermons => "sermons",
            Self::Announcements => "announcements",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = ParseContentKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "events" => Ok(Self::Events),
            "ministries" => Ok(Self::Ministries),
            "ministry-detail" => Ok(Self::MinistryDetail),
            "giving-page" => Ok(Self::GivingPage),
            "site-settings" => Ok(Self::SiteSettings),
            "service-times" => Ok(Self::ServiceTimes),
            "sermons" => Ok(Self::Sermons),
            "announcements" => Ok(Self::Announcements),
            _ => Err(ParseContentKindError),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseContentKindError;

impl std::fmt::Display for ParseContentKindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("invalid content kind; expected one of: events, ministries, ministry-detail, giving-page, site-settings, service-times, sermons, announcements")
    }
}

impl Error for ParseContentKindError {}

/// Secondary resources fetched to enrich a primary payload.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum RelatedKind {
    /// Images attached to events, keyed by event id
    EventImages,
    /// Leader contact rows attached to ministries, keyed by ministry id
    MinistryLeaders,
}

impl RelatedKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EventImages => "event-images",
            Self::MinistryLeaders => "ministry-leaders",
        }
    }
}

impl std::fmt::Display for RelatedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes one content read: what to fetch and how much of it.
///
/// Requests are built per call and dropped once the resolution returns; they
/// carry no connection state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRequest {
    /// Resource kind to read
    pub kind: ContentKind,
    /// Optional row filter key (e.g. a ministry slug)
    pub slug: Option<String>,
    /// Optional row cap for list kinds
    pub limit: Option<usize>,
}

impl ContentRequest {
    pub fn new(kind: ContentKind) -> Self {
        Self {
            kind,
            slug: None,
            limit: None,
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Classified result of one attempt to read from the live store.
///
/// The fetcher folds every failure mode into one of these variants so the
/// resolver can branch over a closed set instead of a catch-all error.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The store answered with at least one row
    Success(Vec<Value>),
    /// The store answered, but the result set was empty
    Empty,
    /// The store was unreachable or the client is not configured
    TransientFailure(String),
    /// The store refused the read (auth / row-level policy)
    PolicyRejected(String),
    /// Anything the other variants do not anticipate
    UnexpectedError(String),
}

impl FetchOutcome {
    /// Short label used in log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Empty => "empty",
            Self::TransientFailure(_) => "transient_failure",
            Self::PolicyRejected(_) => "policy_rejected",
            Self::UnexpectedError(_) => "unexpected_error",
        }
    }
}

/// Where the data in a [`ResolvedContent`] envelope came from.
///
/// Serialized values are a wire contract: front-end callers branch on the
/// exact strings `"database"`, `"default"` and `"error_fallback"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Live rows from the managed store
    Database,
    /// Bundled default payload substituted on a classified failure
    Default,
    /// Bundled default payload substituted on an unanticipated failure
    ErrorFallback,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Default => "default",
            Self::ErrorFallback => "error_fallback",
        }
    }
}

/// The envelope every resolution returns: usable data plus provenance.
///
/// `data` is always present. When the live store cannot serve the request the
/// bundled default payload takes its place and `source` records the downgrade;
/// `message` carries a diagnostic suitable for logs, not for end users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedContent<T> {
    /// The payload, live or substituted, never absent
    pub data: T,
    /// Provenance tag for the payload
    pub source: Provenance,
    /// Human-readable diagnostic describing how the resolution went
    pub message: String,
}

impl<T> ResolvedContent<T> {
    /// Envelope for live rows.
    pub fn database(data: T, record_count: usize) -> Self {
        Self {
            data,
            source: Provenance::Database,
            message: format!("Loaded {} records", record_count),
        }
    }

    /// Envelope for a bundled default substituted on a classified failure.
    pub fn default_payload(data: T, reason: impl Into<String>) -> Self {
        Self {
            data,
            source: Provenance::Default,
            message: reason.into(),
        }
    }

    /// Envelope for a bundled default substituted on an unanticipated failure.
    pub fn error_fallback(data: T, reason: impl Into<String>) -> Self {
        Self {
            data,
            source: Provenance::ErrorFallback,
            message: reason.into(),
        }
    }

    /// True when the payload is not live store data.
    pub fn is_degraded(&self) -> bool {
        self.source != Provenance::Database
    }

    /// Map the payload while keeping provenance and message intact.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ResolvedContent<U> {
        ResolvedContent {
            data: f(self.data),
            source: self.source,
            message: self.message,
        }
    }
}
