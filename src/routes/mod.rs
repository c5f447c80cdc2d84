//! Router assembly and the JSON error envelope.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owner endpoints live under `/api/forms` and require the `X-User-Id`
//! header. Visitor endpoints live under `/api/submit/{token}` and are keyed by
//! the form's share token alone. Every non-2xx response carries an
//! `{code, message}` body so clients can branch on the code.

pub mod auth;
pub mod forms;
pub mod submit;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post, put};
use designer::net::ErrorBody;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::services::ErrorCode;
use crate::services::form::FormError;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/forms", get(forms::list_forms).post(forms::create_form))
        .route("/api/forms/stats", get(forms::form_stats))
        .route("/api/forms/{id}", get(forms::get_form))
        .route("/api/forms/{id}/content", put(forms::save_content))
        .route("/api/forms/{id}/publish", post(forms::publish_form))
        .route("/api/forms/{id}/submissions", get(forms::get_form_with_submissions))
        .route("/api/submit/{token}", get(submit::visit).post(submit::submit))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// ERRORS
// =============================================================================

pub(crate) fn form_error_to_status(err: &FormError) -> StatusCode {
    match err {
        FormError::NotFound(_) => StatusCode::NOT_FOUND,
        FormError::AlreadyPublished(_) | FormError::NotPublished => StatusCode::CONFLICT,
        FormError::InvalidContent(_) | FormError::InvalidName { .. } | FormError::InvalidSubmission(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        FormError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Error response: a status plus the JSON envelope.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        let status = form_error_to_status(&err);
        let message = if status.is_server_error() {
            tracing::error!(error = %err, "form request failed");
            "internal error".to_owned()
        } else {
            err.to_string()
        };
        Self { status, body: ErrorBody { code: err.error_code().to_owned(), message } }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
