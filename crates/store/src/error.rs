use thiserror::Error;

/// Everything that can go wrong talking to the content store.
///
/// The variants separate the failure classes the resolution facade branches
/// on: configuration problems, transport problems, policy denials, and
/// responses that came back but could not be used.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No store credentials are present; the client was never built.
    #[error("configuration missing")]
    NotConfigured,

    /// The configured base URL failed validation.
    #[error("invalid store base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The request never produced an HTTP response (connect, timeout, DNS).
    #[error("store unreachable: {0}")]
    Transport(String),

    /// The store answered but refused the operation (auth or row policy).
    #[error("store rejected the request: {0}")]
    PolicyDenied(String),

    /// A response arrived with a status outside the expected set.
    #[error("store returned HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The response body was not the JSON shape the operation requires.
    #[error("store response could not be decoded: {0}")]
    Decode(String),

    /// An insert collided with an existing row (duplicate key).
    #[error("row already exists: {0}")]
    Conflict(String),
}

impl StoreError {
    /// Short label used in log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotConfigured => "not_configured",
            Self::InvalidBaseUrl { .. } => "invalid_base_url",
            Self::Transport(_) => "transport",
            Self::PolicyDenied(_) => "policy_denied",
            Self::UnexpectedStatus { .. } => "unexpected_status",
            Self::Decode(_) => "decode",
            Self::Conflict(_) => "conflict",
        }
    }
}
