//! HTTP implementation of [`FormBackend`] against the form service.
//!
//! Thin reqwest wrapper. Status and body handling live in the pure
//! [`read_response`] / [`error_from_body`] functions so they can be tested
//! without a server.

#[cfg(test)]
#[path = "net_test.rs"]
mod net_test;

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::backend::{BackendError, FormBackend, FormId, FormRecord, FormStats, FormSummary, FormWithSubmissions};
use crate::element::ElementInstance;
use crate::submission::ValueMap;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
/// Header carrying the owner id; set by the auth proxy in production.
pub const USER_ID_HEADER: &str = "x-user-id";

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateFormBody {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedForm {
    pub id: FormId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContentBody {
    pub elements: Vec<ElementInstance>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitBody {
    pub values: ValueMap,
}

/// Error payload returned by the service on every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpFormClient {
    http: reqwest::Client,
    base_url: String,
    user_id: Option<String>,
}

impl HttpFormClient {
    /// # Errors
    ///
    /// `Http` if the underlying client cannot be built.
    pub fn new(base_url: impl Into<String>, user_id: Option<String>) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| BackendError::Http(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { http, base_url, user_id })
    }

    /// Client configured from `FORMCRAFT_BASE_URL` and `FORMCRAFT_USER_ID`.
    ///
    /// # Errors
    ///
    /// As [`HttpFormClient::new`].
    pub fn from_env() -> Result<Self, BackendError> {
        let base_url = std::env::var("FORMCRAFT_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let user_id = match std::env::var("FORMCRAFT_USER_ID") {
            Ok(id) if !id.is_empty() => Some(id),
            _ => None,
        };
        Self::new(base_url, user_id)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, BackendError> {
        let mut request = self.http.request(method, format!("{}{path}", self.base_url));
        if let Some(user_id) = &self.user_id {
            request = request.header(USER_ID_HEADER, user_id);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(|e| BackendError::Http(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| BackendError::Http(e.to_string()))?;
        read_response(status, &text)
    }
}

/// Decode a response body, or turn a failure status into a [`BackendError`].
///
/// Empty 2xx bodies decode as JSON `null`, so `T = ()` accepts `204`.
///
/// # Errors
///
/// The mapped error for non-2xx statuses, `Decode` for bodies that do not
/// match `T`.
pub fn read_response<T: DeserializeOwned>(status: u16, text: &str) -> Result<T, BackendError> {
    if !(200..300).contains(&status) {
        return Err(error_from_body(status, text));
    }
    let text = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(text).map_err(|e| BackendError::Decode(e.to_string()))
}

/// Map a failure status and its [`ErrorBody`] to a [`BackendError`].
#[must_use]
pub fn error_from_body(status: u16, text: &str) -> BackendError {
    let body = serde_json::from_str::<ErrorBody>(text)
        .unwrap_or_else(|_| ErrorBody { code: String::new(), message: text.to_owned() });
    match (status, body.code.as_str()) {
        (404, _) => BackendError::NotFound(body.message),
        (_, "E_NOT_PUBLISHED") => BackendError::NotPublished,
        (_, "E_ALREADY_PUBLISHED") => BackendError::AlreadyPublished,
        (400 | 422, _) => BackendError::Rejected { code: body.code, message: body.message },
        _ => BackendError::Status { status, message: body.message },
    }
}

#[async_trait]
impl FormBackend for HttpFormClient {
    async fn create_form(&self, name: &str, description: &str) -> Result<FormId, BackendError> {
        let body = CreateFormBody { name: name.to_owned(), description: description.to_owned() };
        let created: CreatedForm = self.send(reqwest::Method::POST, "/api/forms", Some(&body)).await?;
        Ok(created.id)
    }

    async fn list_forms(&self) -> Result<Vec<FormSummary>, BackendError> {
        self.send::<(), _>(reqwest::Method::GET, "/api/forms", None).await
    }

    async fn form_stats(&self) -> Result<FormStats, BackendError> {
        self.send::<(), _>(reqwest::Method::GET, "/api/forms/stats", None).await
    }

    async fn get_form_by_id(&self, form_id: FormId) -> Result<FormRecord, BackendError> {
        self.send::<(), _>(reqwest::Method::GET, &format!("/api/forms/{form_id}"), None).await
    }

    async fn get_form_with_submissions(&self, form_id: FormId) -> Result<FormWithSubmissions, BackendError> {
        self.send::<(), _>(reqwest::Method::GET, &format!("/api/forms/{form_id}/submissions"), None).await
    }

    async fn save_form_content(&self, form_id: FormId, elements: &[ElementInstance]) -> Result<(), BackendError> {
        let body = ContentBody { elements: elements.to_vec() };
        self.send(reqwest::Method::PUT, &format!("/api/forms/{form_id}/content"), Some(&body)).await
    }

    async fn publish_form(&self, form_id: FormId) -> Result<(), BackendError> {
        self.send::<(), _>(reqwest::Method::POST, &format!("/api/forms/{form_id}/publish"), None).await
    }

    async fn record_visit(&self, share_token: &str) -> Result<Vec<ElementInstance>, BackendError> {
        let body: ContentBody = self.send::<(), _>(reqwest::Method::GET, &format!("/api/submit/{share_token}"), None).await?;
        Ok(body.elements)
    }

    async fn record_submission(&self, share_token: &str, values: &ValueMap) -> Result<(), BackendError> {
        let body = SubmitBody { values: values.clone() };
        self.send(reqwest::Method::POST, &format!("/api/submit/{share_token}"), Some(&body)).await
    }
}
