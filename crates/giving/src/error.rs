use steeple_store::StoreError;
use thiserror::Error;

/// Failures in the donation flow.
///
/// Unlike content reads, giving operations surface their errors: a donor who
/// cannot pay needs to know, so nothing here is absorbed into a fallback.
#[derive(Debug, Error)]
pub enum GivingError {
    /// Processor credentials are absent or blank.
    #[error("payments configuration missing")]
    NotConfigured,

    /// The configured processor base URL is unusable.
    #[error("invalid payments base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The donation request failed validation before any network call.
    #[error("{0}")]
    InvalidRequest(String),

    /// The processor could not be reached.
    #[error("payments request failed: {0}")]
    Transport(String),

    /// The processor rejected the request with a client error.
    #[error("processor rejected the request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The processor answered with a status this client does not handle.
    #[error("processor returned HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// A processor payload could not be decoded.
    #[error("processor response could not be decoded: {0}")]
    Decode(String),

    /// The donation ledger insert failed for a reason other than a duplicate.
    #[error("donation could not be recorded: {0}")]
    Ledger(#[source] StoreError),
}
