//! Donation flow for the Steeple backend.
//!
//! Two halves: [`PaymentsClient`] opens payment intents with the processor
//! (validated and form-encoded before any network call), and
//! [`DonationLedger`] books succeeded intents from verified webhook events
//! into the store, deduplicated on event id.
//!
//! Giving is the one surface that does not fall back: a donor must see a
//! real error, not a default payload, so everything here returns
//! [`GivingError`] instead of absorbing failures.

pub mod client;
pub mod config;
pub mod error;
pub mod webhook;

pub use client::{
    MAX_DONATION_MINOR, MIN_DONATION_MINOR, PaymentsClient, SUPPORTED_CURRENCIES, encode_form, intent_form,
};
pub use config::{PAYMENTS_BASE_ENV, PAYMENTS_SECRET_ENV, PaymentsConfig};
pub use error::GivingError;
pub use webhook::{DONATIONS_TABLE, DonationLedger, RecordOutcome, SUCCEEDED_EVENT, WebhookEvent};
