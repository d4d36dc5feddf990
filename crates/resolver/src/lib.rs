//! Content resolution with default-payload fallback.
//!
//! The public site must render something sensible whether the managed store
//! is healthy, empty, misconfigured, or on fire. This crate implements that
//! guarantee as a small pipeline:
//!
//! - [`fetcher::SourceFetcher`] performs one classified read, never erroring;
//! - [`resolver::FallbackResolver`] matches the classification exhaustively
//!   and substitutes the bundled default payload on every non-success path;
//! - [`adapters`] carry the per-kind typed transforms and default accessors;
//! - [`site::SiteContent`] is the facade handlers call, one method per kind.
//!
//! Every resolution reports provenance (`"database"`, `"default"`,
//! `"error_fallback"`) so callers and dashboards can see degradation without
//! the page ever failing.

pub mod adapters;
pub mod fetcher;
pub mod related;
pub mod resolver;
pub mod site;

pub use adapters::ContentAdapter;
pub use fetcher::{CONFIGURATION_MISSING, SourceFetcher, StoreFetcher};
pub use related::{RELATED_TIMEOUT, RelatedLookup};
pub use resolver::{FallbackResolver, NO_RECORDS_FOUND};
pub use site::SiteContent;
