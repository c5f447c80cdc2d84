//! Collaborator seams: persistence and user notifications.
//!
//! The designer never talks to a database or a toast widget directly. Edit
//! and fill sessions go through [`FormBackend`] for persistence and
//! [`Notifier`] for user-facing messages. The wire types here are shared with
//! the form service so both ends agree on the JSON shape.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::element::ElementInstance;
use crate::submission::ValueMap;

/// Server-assigned form identifier.
pub type FormId = i64;

// =============================================================================
// WIRE TYPES
// =============================================================================

/// A form with its decoded element list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRecord {
    pub id: FormId,
    pub name: String,
    pub description: String,
    pub elements: Vec<ElementInstance>,
    pub published: bool,
    pub share_token: String,
    pub visits: i64,
    pub submissions: i64,
    pub created_at_ms: i64,
}

/// Dashboard row; no content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSummary {
    pub id: FormId,
    pub name: String,
    pub description: String,
    pub published: bool,
    pub visits: i64,
    pub submissions: i64,
    pub created_at_ms: i64,
}

/// Aggregate counters over every form of one owner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormStats {
    pub visits: i64,
    pub submissions: i64,
    /// Percentage of visits that ended in a submission.
    pub submission_rate: f64,
    pub bounce_rate: f64,
}

impl FormStats {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_counts(visits: i64, submissions: i64) -> Self {
        let submission_rate = if visits > 0 { submissions as f64 / visits as f64 * 100.0 } else { 0.0 };
        Self { visits, submissions, submission_rate, bounce_rate: 100.0 - submission_rate }
    }
}

/// One stored submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRow {
    pub id: i64,
    pub form_id: FormId,
    pub values: ValueMap,
    pub created_at_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormWithSubmissions {
    pub form: FormRecord,
    pub submissions: Vec<SubmissionRow>,
}

// =============================================================================
// PERSISTENCE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("form is not published")]
    NotPublished,
    #[error("form is already published")]
    AlreadyPublished,
    #[error("rejected ({code}): {message}")]
    Rejected { code: String, message: String },
    #[error("unexpected status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("request failed: {0}")]
    Http(String),
    #[error("invalid response: {0}")]
    Decode(String),
}

/// Persistence collaborator. Calls are awaited to completion; retrying is the
/// caller's decision.
#[async_trait]
pub trait FormBackend: Send + Sync {
    async fn create_form(&self, name: &str, description: &str) -> Result<FormId, BackendError>;

    /// The owner's forms, newest first.
    async fn list_forms(&self) -> Result<Vec<FormSummary>, BackendError>;

    async fn form_stats(&self) -> Result<FormStats, BackendError>;

    async fn get_form_by_id(&self, form_id: FormId) -> Result<FormRecord, BackendError>;

    async fn get_form_with_submissions(&self, form_id: FormId) -> Result<FormWithSubmissions, BackendError>;

    async fn save_form_content(&self, form_id: FormId, elements: &[ElementInstance]) -> Result<(), BackendError>;

    async fn publish_form(&self, form_id: FormId) -> Result<(), BackendError>;

    /// Count a visit to a published form and return its elements.
    async fn record_visit(&self, share_token: &str) -> Result<Vec<ElementInstance>, BackendError>;

    /// Store a submission. Rejected with `NotPublished` for unpublished forms.
    async fn record_submission(&self, share_token: &str, values: &ValueMap) -> Result<(), BackendError>;
}

// =============================================================================
// NOTIFICATIONS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), severity: Severity::Success }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), severity: Severity::Error }
    }
}

/// Fire-and-forget user notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Notifier that writes to the `tracing` log. Useful headless and in tools.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, n: Notification) {
        match n.severity {
            Severity::Error => tracing::warn!(title = %n.title, description = %n.description, "notification"),
            Severity::Info | Severity::Success => {
                tracing::info!(title = %n.title, description = %n.description, "notification");
            }
        }
    }
}
