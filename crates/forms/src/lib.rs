//! Contact and planned-visit submissions.
//!
//! Submissions are shaped server-side (trimmed, length-capped, required
//! fields checked) and written to the store in a single attempt. The service
//! never errors toward the submitter: an unusable submission or a store
//! failure both come back as a declined [`SubmissionReceipt`], and the store
//! failure is logged with its reason redacted.

use std::sync::Arc;

use serde_json::{Value, json};
use steeple_store::RowWriter;
use steeple_types::{ContactMessage, PlannedVisit, SubmissionReceipt};
use steeple_util::{clean_field, clean_multiline_field, redact_sensitive};
use tracing::{info, warn};

/// Table receiving contact-form rows.
pub const CONTACT_TABLE: &str = "contact_messages";
/// Table receiving planned-visit rows.
pub const VISIT_TABLE: &str = "planned_visits";

const MAX_NAME_CHARS: usize = 120;
const MAX_EMAIL_CHARS: usize = 254;
const MAX_PHONE_CHARS: usize = 32;
const MAX_SUBJECT_CHARS: usize = 200;
const MAX_MESSAGE_CHARS: usize = 4_000;
const MAX_QUESTIONS_CHARS: usize = 2_000;

const STORE_DOWN_MESSAGE: &str = "We couldn't save your submission right now. Please try again in a few minutes.";

/// Writes shaped form rows through an injected store handle.
pub struct FormsService {
    writer: Arc<dyn RowWriter>,
}

impl FormsService {
    pub fn new(writer: Arc<dyn RowWriter>) -> Self {
        Self { writer }
    }

    /// Shape and store a contact message.
    pub async fn submit_contact(&self, message: &ContactMessage) -> SubmissionReceipt {
        let row = match shape_contact(message) {
            Ok(row) => row,
            Err(reason) => return SubmissionReceipt::declined(reason),
        };
        self.insert(CONTACT_TABLE, &row, "Thanks for reaching out. We'll get back to you soon.")
            .await
    }

    /// Shape and store a planned visit.
    pub async fn submit_planned_visit(&self, visit: &PlannedVisit) -> SubmissionReceipt {
        let row = match shape_visit(visit) {
            Ok(row) => row,
            Err(reason) => return SubmissionReceipt::declined(reason),
        };
        self.insert(VISIT_TABLE, &row, "We can't wait to meet you. We'll save you a seat.")
            .await
    }

    async fn insert(&self, table: &str, row: &Value, thanks: &str) -> SubmissionReceipt {
        match self.writer.insert(table, row).await {
            Ok(stored) => {
                let reference = row_reference(&stored);
                info!(table, reference = reference.as_deref().unwrap_or("-"), "submission stored");
                SubmissionReceipt::accepted(reference, thanks)
            }
            Err(error) => {
                warn!(table, error = %redact_sensitive(&error.to_string()), "submission insert failed");
                SubmissionReceipt::declined(STORE_DOWN_MESSAGE)
            }
        }
    }
}

/// Shape a contact message into its stored row.
///
/// The error side carries the submitter-facing decline reason.
pub fn shape_contact(message: &ContactMessage) -> Result<Value, String> {
    let name = clean_field(&message.name, MAX_NAME_CHARS);
    if name.is_empty() {
        return Err("Please tell us your name.".into());
    }

    let email = clean_field(&message.email, MAX_EMAIL_CHARS);
    if !plausible_email(&email) {
        return Err("Please provide a valid email address.".into());
    }

    let body = clean_multiline_field(&message.message, MAX_MESSAGE_CHARS);
    if body.is_empty() {
        return Err("Please include a message.".into());
    }

    Ok(json!({
        "name": name,
        "email": email,
        "phone": optional_field(message.phone.as_deref(), MAX_PHONE_CHARS),
        "subject": optional_field(message.subject.as_deref(), MAX_SUBJECT_CHARS),
        "message": body,
    }))
}

/// Shape a planned visit into its stored row.
pub fn shape_visit(visit: &PlannedVisit) -> Result<Value, String> {
    let name = clean_field(&visit.name, MAX_NAME_CHARS);
    if name.is_empty() {
        return Err("Please tell us your name.".into());
    }

    let email = clean_field(&visit.email, MAX_EMAIL_CHARS);
    if !plausible_email(&email) {
        return Err("Please provide a valid email address.".into());
    }

    let questions = visit
        .questions
        .as_deref()
        .map(|text| clean_multiline_field(text, MAX_QUESTIONS_CHARS))
        .filter(|text| !text.is_empty());

    Ok(json!({
        "name": name,
        "email": email,
        "visit_date": visit.visit_date,
        "party_size": positive_count(visit.party_size),
        "children": positive_count(visit.children),
        "questions": questions,
    }))
}

fn optional_field(value: Option<&str>, max_chars: usize) -> Option<String> {
    value.map(|text| clean_field(text, max_chars)).filter(|text| !text.is_empty())
}

/// A zero count means the field was left blank, not a party of zero.
fn positive_count(value: Option<u32>) -> Option<u32> {
    value.filter(|&count| count > 0)
}

/// Cheap plausibility check; real validation belongs to the form UI.
fn plausible_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

fn row_reference(stored: &Value) -> Option<String> {
    match stored.get("id") {
        Some(Value::String(id)) => Some(id.clone()),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    }
}
