//! Form submission payloads and the receipt envelope returned to submitters.

use serde::{Deserialize, Serialize};

/// A message sent through the contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

/// A planned-visit form submission ("we're coming this Sunday").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedVisit {
    pub name: String,
    pub email: String,
    /// Intended visit date, if the visitor picked one
    #[serde(default)]
    pub visit_date: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub party_size: Option<u32>,
    /// How many children are in the party (drives nursery planning)
    #[serde(default)]
    pub children: Option<u32>,
    #[serde(default)]
    pub questions: Option<String>,
}

/// Outcome envelope for a form submission.
///
/// A submission is either accepted with a row reference, or declined with a
/// reason. The writer absorbs store failures into `accepted: false` rather
/// than erroring, so a submitter-facing handler can always render this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub accepted: bool,
    pub message: String,
    /// Identifier of the stored row, when the insert went through
    #[serde(default)]
    pub reference: Option<String>,
}

impl SubmissionReceipt {
    pub fn accepted(reference: Option<String>, message: impl Into<String>) -> Self {
        Self {
            accepted: true,
            message: message.into(),
            reference,
        }
    }

    pub fn declined(message: impl Into<String>) -> Self {
        Self {
            accepted: false,
            message: message.into(),
            reference: None,
        }
    }
}
