//! Form service: CRUD, publishing, visits, and submissions.
//!
//! DESIGN
//! ======
//! Every form belongs to one owner and is only reachable through that owner's
//! id, except on the share-token paths used by visitors. Content is stored as
//! the ordered `{id, type, attributes}` array the designer serializes; it is
//! decoded with the field registry on the way in so the database never holds
//! an element list the designer could not load back.
//!
//! A form is editable until published. Publishing is one-way: content saves
//! are rejected afterwards, and only published forms accept visits and
//! submissions.
//!
//! ERROR HANDLING
//! ==============
//! Guarded updates carry their precondition in the `WHERE` clause. When such
//! an update touches no row, a follow-up read decides which precondition
//! failed so callers get `NotFound` versus `AlreadyPublished`/`NotPublished`
//! rather than a generic failure. Submissions are re-validated here with the
//! same rules the fill view applies; a client that skipped them gets
//! `InvalidSubmission` with the failing ids.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use std::collections::BTreeSet;

use designer::backend::{FormId, FormRecord, FormStats, FormSummary, FormWithSubmissions, SubmissionRow};
use designer::element::{DecodeError, ElementId, ElementInstance, RawElement};
use designer::registry::FieldRegistry;
use designer::store::ElementStore;
use designer::submission::{ValueMap, validate_submission};
use rand::Rng;
use rand::distr::Alphanumeric;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::info;

use super::ErrorCode;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("form not found: {0}")]
    NotFound(String),
    #[error("form {0} is already published")]
    AlreadyPublished(FormId),
    #[error("form is not published")]
    NotPublished,
    #[error("invalid form content: {0}")]
    InvalidContent(String),
    #[error("form name must be at least {min} characters")]
    InvalidName { min: usize },
    #[error("submission rejected for fields: {}", join_ids(.0))]
    InvalidSubmission(BTreeSet<ElementId>),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ErrorCode for FormError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_FORM_NOT_FOUND",
            Self::AlreadyPublished(_) => "E_ALREADY_PUBLISHED",
            Self::NotPublished => "E_NOT_PUBLISHED",
            Self::InvalidContent(_) => "E_INVALID_CONTENT",
            Self::InvalidName { .. } => "E_INVALID_NAME",
            Self::InvalidSubmission(_) => "E_INVALID_SUBMISSION",
            Self::Database(_) => "E_DATABASE",
        }
    }
}

impl From<DecodeError> for FormError {
    fn from(err: DecodeError) -> Self {
        Self::InvalidContent(err.to_string())
    }
}

fn join_ids(ids: &BTreeSet<ElementId>) -> String {
    ids.iter().map(ElementId::as_str).collect::<Vec<_>>().join(", ")
}

/// Limits applied when a form is created.
#[derive(Debug, Clone, Copy)]
pub struct CreateLimits {
    pub name_min_len: usize,
    pub share_token_len: usize,
}

type FormTuple = (i64, String, String, serde_json::Value, bool, String, i64, i64, i64);

const FORM_COLUMNS: &str = "id, name, description, content, published, share_token, visits, submissions, \
     (EXTRACT(EPOCH FROM created_at) * 1000)::BIGINT";

// =============================================================================
// HELPERS
// =============================================================================

/// Trimmed name, provided it is long enough.
///
/// # Errors
///
/// `InvalidName` when shorter than `min` characters after trimming.
pub fn validate_name(name: &str, min: usize) -> Result<String, FormError> {
    let trimmed = name.trim();
    if trimmed.chars().count() < min {
        return Err(FormError::InvalidName { min });
    }
    Ok(trimmed.to_owned())
}

/// Random alphanumeric token used in public fill URLs.
#[must_use]
pub fn generate_share_token(len: usize) -> String {
    rand::rng().sample_iter(&Alphanumeric).take(len).map(char::from).collect()
}

/// Decode a stored or uploaded element list with the registry.
///
/// # Errors
///
/// `InvalidContent` on malformed JSON, an unknown type tag, bad attributes,
/// or a repeated element id.
pub fn decode_content(registry: &FieldRegistry, value: serde_json::Value) -> Result<Vec<ElementInstance>, FormError> {
    let raws: Vec<RawElement> = serde_json::from_value(value).map_err(DecodeError::from)?;
    decode_elements(registry, raws)
}

/// # Errors
///
/// See [`decode_content`].
pub fn decode_elements(registry: &FieldRegistry, raws: Vec<RawElement>) -> Result<Vec<ElementInstance>, FormError> {
    let elements = raws
        .into_iter()
        .map(|raw| registry.decode(raw))
        .collect::<Result<Vec<_>, _>>()?;
    let store = ElementStore::from_elements(elements).map_err(|e| FormError::InvalidContent(e.to_string()))?;
    Ok(store.into_elements())
}

/// Drop values keyed by ids the form does not contain.
#[must_use]
pub fn retain_known_values(elements: &[ElementInstance], mut values: ValueMap) -> ValueMap {
    values.retain(|id, _| elements.iter().any(|e| &e.id == id));
    values
}

fn record_from_tuple(registry: &FieldRegistry, row: FormTuple) -> Result<FormRecord, FormError> {
    let (id, name, description, content, published, share_token, visits, submissions, created_at_ms) = row;
    Ok(FormRecord {
        id,
        name,
        description,
        elements: decode_content(registry, content)?,
        published,
        share_token,
        visits,
        submissions,
        created_at_ms,
    })
}

/// Distinguish "no such token" from "not published" after a guarded update missed.
async fn share_token_miss(pool: &PgPool, share_token: &str) -> FormError {
    let found = sqlx::query_as::<_, (bool,)>("SELECT published FROM forms WHERE share_token = $1")
        .bind(share_token)
        .fetch_optional(pool)
        .await;
    match found {
        Ok(Some(_)) => FormError::NotPublished,
        Ok(None) => FormError::NotFound(format!("share token {share_token}")),
        Err(e) => FormError::Database(e),
    }
}

async fn owned_published_flag(pool: &PgPool, owner_id: &str, form_id: FormId) -> Result<bool, FormError> {
    let row = sqlx::query_as::<_, (bool,)>("SELECT published FROM forms WHERE id = $1 AND owner_id = $2")
        .bind(form_id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;
    row.map(|(published,)| published)
        .ok_or_else(|| FormError::NotFound(form_id.to_string()))
}

// =============================================================================
// OWNER OPERATIONS
// =============================================================================

/// Create an empty, unpublished form and return its id.
///
/// # Errors
///
/// `InvalidName` or a database error.
pub async fn create_form(
    pool: &PgPool,
    limits: CreateLimits,
    owner_id: &str,
    name: &str,
    description: &str,
) -> Result<FormId, FormError> {
    let name = validate_name(name, limits.name_min_len)?;
    let share_token = generate_share_token(limits.share_token_len);
    let (id,) = sqlx::query_as::<_, (i64,)>(
        "INSERT INTO forms (owner_id, name, description, share_token) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(owner_id)
    .bind(&name)
    .bind(description.trim())
    .bind(&share_token)
    .fetch_one(pool)
    .await?;

    info!(form_id = id, %owner_id, "form created");
    Ok(id)
}

/// The owner's forms, newest first.
///
/// # Errors
///
/// Database errors.
pub async fn list_forms(pool: &PgPool, owner_id: &str) -> Result<Vec<FormSummary>, FormError> {
    let rows = sqlx::query_as::<_, (i64, String, String, bool, i64, i64, i64)>(
        "SELECT id, name, description, published, visits, submissions, \
         (EXTRACT(EPOCH FROM created_at) * 1000)::BIGINT \
         FROM forms WHERE owner_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, name, description, published, visits, submissions, created_at_ms)| FormSummary {
            id,
            name,
            description,
            published,
            visits,
            submissions,
            created_at_ms,
        })
        .collect())
}

/// Visit and submission totals across the owner's forms.
///
/// # Errors
///
/// Database errors.
pub async fn form_stats(pool: &PgPool, owner_id: &str) -> Result<FormStats, FormError> {
    let (visits, submissions) = sqlx::query_as::<_, (i64, i64)>(
        "SELECT COALESCE(SUM(visits), 0)::BIGINT, COALESCE(SUM(submissions), 0)::BIGINT \
         FROM forms WHERE owner_id = $1",
    )
    .bind(owner_id)
    .fetch_one(pool)
    .await?;
    Ok(FormStats::from_counts(visits, submissions))
}

/// # Errors
///
/// `NotFound` when the form does not exist or belongs to someone else.
pub async fn get_form(
    pool: &PgPool,
    registry: &FieldRegistry,
    owner_id: &str,
    form_id: FormId,
) -> Result<FormRecord, FormError> {
    let row = sqlx::query_as::<_, FormTuple>(&format!(
        "SELECT {FORM_COLUMNS} FROM forms WHERE id = $1 AND owner_id = $2"
    ))
    .bind(form_id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| FormError::NotFound(form_id.to_string()))?;
    record_from_tuple(registry, row)
}

/// Replace the element list of an unpublished form.
///
/// # Errors
///
/// `InvalidContent` if the list does not decode, `NotFound`, or
/// `AlreadyPublished`.
pub async fn save_content(
    pool: &PgPool,
    registry: &FieldRegistry,
    owner_id: &str,
    form_id: FormId,
    raws: Vec<RawElement>,
) -> Result<usize, FormError> {
    let elements = decode_elements(registry, raws)?;
    let result = sqlx::query("UPDATE forms SET content = $3 WHERE id = $1 AND owner_id = $2 AND published = FALSE")
        .bind(form_id)
        .bind(owner_id)
        .bind(Json(&elements))
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(if owned_published_flag(pool, owner_id, form_id).await? {
            FormError::AlreadyPublished(form_id)
        } else {
            FormError::NotFound(form_id.to_string())
        });
    }

    info!(form_id, count = elements.len(), "form content saved");
    Ok(elements.len())
}

/// # Errors
///
/// `NotFound` or `AlreadyPublished`.
pub async fn publish(pool: &PgPool, owner_id: &str, form_id: FormId) -> Result<(), FormError> {
    let result = sqlx::query("UPDATE forms SET published = TRUE WHERE id = $1 AND owner_id = $2 AND published = FALSE")
        .bind(form_id)
        .bind(owner_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        owned_published_flag(pool, owner_id, form_id).await?;
        return Err(FormError::AlreadyPublished(form_id));
    }

    info!(form_id, "form published");
    Ok(())
}

/// A form and its stored submissions, newest first.
///
/// # Errors
///
/// `NotFound`, or `InvalidContent` if a stored submission no longer decodes.
pub async fn get_form_with_submissions(
    pool: &PgPool,
    registry: &FieldRegistry,
    owner_id: &str,
    form_id: FormId,
) -> Result<FormWithSubmissions, FormError> {
    let form = get_form(pool, registry, owner_id, form_id).await?;
    let rows = sqlx::query_as::<_, (i64, serde_json::Value, i64)>(
        "SELECT id, content, (EXTRACT(EPOCH FROM created_at) * 1000)::BIGINT \
         FROM form_submissions WHERE form_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(form_id)
    .fetch_all(pool)
    .await?;

    let submissions = rows
        .into_iter()
        .map(|(id, content, created_at_ms)| {
            let values: ValueMap =
                serde_json::from_value(content).map_err(|e| FormError::InvalidContent(e.to_string()))?;
            Ok(SubmissionRow { id, form_id, values, created_at_ms })
        })
        .collect::<Result<Vec<_>, FormError>>()?;

    Ok(FormWithSubmissions { form, submissions })
}

// =============================================================================
// VISITOR OPERATIONS
// =============================================================================

/// Count a visit and return the published form's elements.
///
/// # Errors
///
/// `NotFound` for an unknown token, `NotPublished` for a draft.
pub async fn record_visit(
    pool: &PgPool,
    registry: &FieldRegistry,
    share_token: &str,
) -> Result<Vec<ElementInstance>, FormError> {
    let row = sqlx::query_as::<_, (serde_json::Value,)>(
        "UPDATE forms SET visits = visits + 1 WHERE share_token = $1 AND published = TRUE RETURNING content",
    )
    .bind(share_token)
    .fetch_optional(pool)
    .await?;

    match row {
        Some((content,)) => decode_content(registry, content),
        None => Err(share_token_miss(pool, share_token).await),
    }
}

/// Validate and store one submission, bumping the form's counter.
///
/// # Errors
///
/// `NotFound`, `NotPublished`, or `InvalidSubmission` with the failing ids.
pub async fn record_submission(
    pool: &PgPool,
    registry: &FieldRegistry,
    share_token: &str,
    values: ValueMap,
) -> Result<(), FormError> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, (i64, serde_json::Value)>(
        "SELECT id, content FROM forms WHERE share_token = $1 AND published = TRUE FOR UPDATE",
    )
    .bind(share_token)
    .fetch_optional(&mut *tx)
    .await?;
    let Some((form_id, content)) = row else {
        tx.rollback().await?;
        return Err(share_token_miss(pool, share_token).await);
    };

    let elements = decode_content(registry, content)?;
    let report = validate_submission(registry, &elements, &values).map_err(|e| FormError::InvalidContent(e.to_string()))?;
    if !report.allowed {
        return Err(FormError::InvalidSubmission(report.errors));
    }
    let values = retain_known_values(&elements, values);

    sqlx::query("INSERT INTO form_submissions (form_id, content) VALUES ($1, $2)")
        .bind(form_id)
        .bind(Json(&values))
        .execute(&mut *tx)
        .await?;
    sqlx::query("UPDATE forms SET submissions = submissions + 1 WHERE id = $1")
        .bind(form_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    info!(form_id, fields = values.len(), "submission recorded");
    Ok(())
}
