//! Webhook intake for completed donations.
//!
//! Signature verification happens upstream, in the processor's own SDK at
//! the web edge. By the time a payload reaches [`WebhookEvent::from_verified_payload`]
//! it is trusted; the job here is bookkeeping: parse the event, and for a
//! succeeded payment intent write one donation row. The event id is the
//! ledger's unique key, so processor redelivery lands as a store conflict
//! and is reported as already recorded instead of failing the hook.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Value, json};
use steeple_store::{RowWriter, StoreError};
use tracing::{debug, info};

use crate::error::GivingError;

/// Table receiving donation rows. `event_id` carries a unique constraint.
pub const DONATIONS_TABLE: &str = "donations";

/// The one event type the ledger records.
pub const SUCCEEDED_EVENT: &str = "payment_intent.succeeded";

/// A processor event whose signature has already been verified.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: EventData,
}

/// The object the event describes, kept raw.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventData {
    #[serde(default)]
    pub object: Value,
}

impl WebhookEvent {
    /// Parse an event payload that has passed signature verification.
    pub fn from_verified_payload(payload: &str) -> Result<Self, GivingError> {
        serde_json::from_str(payload).map_err(|error| GivingError::Decode(error.to_string()))
    }
}

/// What [`DonationLedger::record`] did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A donation row was written.
    Recorded,
    /// The event id was already in the ledger; nothing was written.
    AlreadyRecorded,
    /// The event type is not one the ledger tracks.
    Ignored,
}

/// Writes donation rows for succeeded payment intents.
pub struct DonationLedger {
    writer: Arc<dyn RowWriter>,
}

impl DonationLedger {
    pub fn new(writer: Arc<dyn RowWriter>) -> Self {
        Self { writer }
    }

    /// Record the donation an event describes, once.
    ///
    /// Event types other than `payment_intent.succeeded` are acknowledged
    /// and skipped. A duplicate event id is not an error; the processor
    /// retries delivery until it sees success.
    pub async fn record(&self, event: &WebhookEvent) -> Result<RecordOutcome, GivingError> {
        if event.kind != SUCCEEDED_EVENT {
            debug!(event = %event.id, kind = %event.kind, "event type not ledgered");
            return Ok(RecordOutcome::Ignored);
        }

        let row = donation_row(event)?;
        match self.writer.insert(DONATIONS_TABLE, &row).await {
            Ok(_) => {
                info!(event = %event.id, "donation recorded");
                Ok(RecordOutcome::Recorded)
            }
            Err(StoreError::Conflict(_)) => {
                debug!(event = %event.id, "donation already recorded");
                Ok(RecordOutcome::AlreadyRecorded)
            }
            Err(error) => Err(GivingError::Ledger(error)),
        }
    }
}

/// Shape the ledger row for a succeeded intent.
///
/// The intent id and amount are required; the descriptive fields fall back
/// to the giving page's defaults so a sparse intent still books cleanly.
fn donation_row(event: &WebhookEvent) -> Result<Value, GivingError> {
    let object = &event.data.object;

    let intent_id = object
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| GivingError::Decode(format!("event {} carries no intent id", event.id)))?;

    let amount_minor = object
        .get("amount_received")
        .and_then(Value::as_u64)
        .filter(|&amount| amount > 0)
        .or_else(|| object.get("amount").and_then(Value::as_u64))
        .ok_or_else(|| GivingError::Decode(format!("event {} carries no amount", event.id)))?;

    let currency = object.get("currency").and_then(Value::as_str).unwrap_or("usd");
    let fund = object.pointer("/metadata/fund").and_then(Value::as_str).unwrap_or("general");
    let frequency = object
        .pointer("/metadata/frequency")
        .and_then(Value::as_str)
        .unwrap_or("one_time");
    let donor_email = object.get("receipt_email").and_then(Value::as_str);

    Ok(json!({
        "event_id": event.id,
        "intent_id": intent_id,
        "amount_minor": amount_minor,
        "currency": currency,
        "fund": fund,
        "frequency": frequency,
        "donor_email": donor_email,
    }))
}
