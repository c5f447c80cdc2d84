//! Visitor endpoints, keyed by share token. No owner header.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use designer::net::{ContentBody, SubmitBody};

use super::ApiError;
use crate::services::form;
use crate::state::AppState;

/// `GET /api/submit/{token}`: count a visit and return the form to fill.
pub async fn visit(State(state): State<AppState>, Path(token): Path<String>) -> Result<Json<ContentBody>, ApiError> {
    let elements = form::record_visit(&state.pool, &state.registry, &token).await?;
    Ok(Json(ContentBody { elements }))
}

/// `POST /api/submit/{token}`
pub async fn submit(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(body): Json<SubmitBody>,
) -> Result<StatusCode, ApiError> {
    form::record_submission(&state.pool, &state.registry, &token, body.values).await?;
    Ok(StatusCode::NO_CONTENT)
}
