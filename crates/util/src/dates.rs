//! # Date Presentation
//!
//! Turns stored timestamps into the strings the site renders. Event rows keep
//! a machine timestamp (`starts_at`) and the facade derives the display form
//! here so every surface renders dates the same way.

use chrono::{DateTime, NaiveDate, Utc};

/// Formats an event start as the site's long display form,
/// e.g. `"Sunday, June 8 • 10:00 AM"`.
///
/// Stored timestamps carry the service's wall-clock time; no timezone
/// conversion is applied here.
///
/// # Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use steeple_util::display_event_date;
///
/// let starts_at = Utc.with_ymd_and_hms(2026, 6, 8, 10, 0, 0).unwrap();
/// assert_eq!(display_event_date(&starts_at), "Monday, June 8 • 10:00 AM");
/// ```
pub fn display_event_date(starts_at: &DateTime<Utc>) -> String {
    starts_at.format("%A, %B %-d • %-I:%M %p").to_string()
}

/// Formats a calendar date as the short form used in sermon listings,
/// e.g. `"June 8, 2026"`.
///
/// # Example
/// ```rust
/// use chrono::NaiveDate;
/// use steeple_util::display_short_date;
///
/// let date = NaiveDate::from_ymd_opt(2026, 6, 8).unwrap();
/// assert_eq!(display_short_date(&date), "June 8, 2026");
/// ```
pub fn display_short_date(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn event_display_uses_weekday_month_and_clock() {
        let morning = Utc.with_ymd_and_hms(2026, 6, 7, 10, 0, 0).unwrap();
        assert_eq!(display_event_date(&morning), "Sunday, June 7 • 10:00 AM");

        let evening = Utc.with_ymd_and_hms(2026, 12, 24, 18, 30, 0).unwrap();
        assert_eq!(display_event_date(&evening), "Thursday, December 24 • 6:30 PM");
    }

    #[test]
    fn event_display_does_not_pad_day_or_hour() {
        let early = Utc.with_ymd_and_hms(2026, 3, 1, 9, 5, 0).unwrap();
        let formatted = display_event_date(&early);
        assert_eq!(formatted, "Sunday, March 1 • 9:05 AM");
        assert!(!formatted.contains("09:"), "hour must not be zero-padded");
    }

    #[test]
    fn midnight_and_noon_render_as_twelve() {
        let midnight = Utc.with_ymd_and_hms(2026, 6, 7, 0, 0, 0).unwrap();
        assert_eq!(display_event_date(&midnight), "Sunday, June 7 • 12:00 AM");

        let noon = Utc.with_ymd_and_hms(2026, 6, 7, 12, 0, 0).unwrap();
        assert_eq!(display_event_date(&noon), "Sunday, June 7 • 12:00 PM");
    }

    #[test]
    fn short_date_form() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 4).unwrap();
        assert_eq!(display_short_date(&date), "January 4, 2026");
    }
}
