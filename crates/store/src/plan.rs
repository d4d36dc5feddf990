//! Read-query planning.
//!
//! Every content kind maps to one GET against a table endpoint on the store's
//! REST surface. Planning is pure (the clock is injected) so the exact
//! parameter set each kind produces can be asserted without a network.

use chrono::{DateTime, SecondsFormat, Utc};
use steeple_types::{ContentKind, ContentRequest, RelatedKind};

/// Row cap applied when the caller does not pass a limit.
const DEFAULT_EVENT_LIMIT: usize = 12;
const DEFAULT_SERMON_LIMIT: usize = 10;
/// Announcements are hand-curated and few; cap the scan instead of paging.
const ANNOUNCEMENT_LIMIT: usize = 20;

/// One planned table read: endpoint path segment plus query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub table: &'static str,
    pub params: Vec<(String, String)>,
}

impl QueryPlan {
    fn table(table: &'static str) -> Self {
        Self {
            table,
            params: vec![("select".into(), "*".into())],
        }
    }

    fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }
}

/// Plan the primary read for a content request at the given instant.
///
/// A missing slug on [`ContentKind::MinistryDetail`] plans an `eq.` filter on
/// the empty string; no row matches, the read comes back empty, and the
/// resolver substitutes the default payload. Totality over malformed requests
/// beats refusing them.
pub fn read_plan(request: &ContentRequest, now: DateTime<Utc>) -> QueryPlan {
    let stamp = now.to_rfc3339_opts(SecondsFormat::Secs, true);
    match request.kind {
        ContentKind::Events => QueryPlan::table("events")
            .param("starts_at", format!("gte.{stamp}"))
            .param("order", "starts_at.asc")
            .param("limit", request.limit.unwrap_or(DEFAULT_EVENT_LIMIT).to_string()),
        ContentKind::Ministries => QueryPlan::table("ministries").param("order", "name.asc"),
        ContentKind::MinistryDetail => {
            let slug = request.slug.as_deref().unwrap_or_default();
            QueryPlan::table("ministries")
                .param("slug", format!("eq.{slug}"))
                .param("limit", "1")
        }
        ContentKind::GivingPage => QueryPlan::table("giving_pages").param("limit", "1"),
        ContentKind::SiteSettings => QueryPlan::table("site_settings").param("limit", "1"),
        ContentKind::ServiceTimes => QueryPlan::table("service_times").param("order", "position.asc"),
        ContentKind::Sermons => QueryPlan::table("sermons")
            .param("order", "delivered_on.desc")
            .param("limit", request.limit.unwrap_or(DEFAULT_SERMON_LIMIT).to_string()),
        ContentKind::Announcements => QueryPlan::table("announcements")
            .param("or", format!("(expires_at.is.null,expires_at.gte.{stamp})"))
            .param("order", "posted_at.desc")
            .param("limit", ANNOUNCEMENT_LIMIT.to_string()),
    }
}

/// Plan the lookup of rows related to a set of parent ids.
///
/// Returns `None` when `parent_ids` is empty: there is nothing to join and an
/// `in.()` filter with no members is a malformed request.
pub fn related_plan(kind: RelatedKind, parent_ids: &[String]) -> Option<QueryPlan> {
    if parent_ids.is_empty() {
        return None;
    }
    let member_list = format!("in.({})", parent_ids.join(","));
    let plan = match kind {
        RelatedKind::EventImages => QueryPlan::table("event_images")
            .param("event_id", member_list)
            .param("order", "is_primary.desc"),
        RelatedKind::MinistryLeaders => QueryPlan::table("ministry_leaders").param("ministry_id", member_list),
    };
    Some(plan)
}
