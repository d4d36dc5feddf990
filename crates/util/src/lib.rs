//! Shared helpers for the Steeple content backend: log redaction, date
//! presentation, and text shaping for form fields.

pub mod dates;
pub mod paths;
pub mod redact;
pub mod text;

pub use dates::{display_event_date, display_short_date};
pub use paths::expand_tilde;
pub use redact::{redact_json, redact_sensitive};
pub use text::{clean_field, clean_multiline_field, truncate_chars};
