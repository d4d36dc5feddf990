//! Donation request/response types shared by the giving service and CLI.

use serde::{Deserialize, Serialize};

/// How often a donation recurs.
///
/// Serialized form is part of the giving-page wire contract and is also
/// carried verbatim into payment metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GivingFrequency {
    OneTime,
    Monthly,
}

impl GivingFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneTime => "one_time",
            Self::Monthly => "monthly",
        }
    }
}

impl std::fmt::Display for GivingFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A donation as requested by the giving page, before any processor call.
///
/// Amounts are in minor currency units (cents for USD) to avoid float
/// arithmetic anywhere in the flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationRequest {
    pub amount_minor: u64,
    pub currency: String,
    /// Fund code from the giving page (e.g. "general", "missions")
    pub fund: String,
    pub frequency: GivingFrequency,
    #[serde(default)]
    pub donor_email: Option<String>,
}

/// The processor's payment intent, as returned to the front end.
///
/// `client_secret` is the credential the browser uses to confirm the payment;
/// treat it as sensitive in logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    pub amount: u64,
    pub currency: String,
    pub status: String,
}
