//! Owner endpoints: create, list, edit, publish, and read back results.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use designer::backend::{FormId, FormRecord, FormStats, FormSummary, FormWithSubmissions};
use designer::element::RawElement;
use designer::net::{CreateFormBody, CreatedForm};
use serde::Deserialize;

use super::ApiError;
use super::auth::OwnerId;
use crate::services::form;
use crate::state::AppState;

/// Upload body; elements are decoded against the registry in the service.
#[derive(Deserialize)]
pub struct RawContentBody {
    pub elements: Vec<RawElement>,
}

/// `POST /api/forms`: create an empty draft.
pub async fn create_form(
    State(state): State<AppState>,
    owner: OwnerId,
    Json(body): Json<CreateFormBody>,
) -> Result<(StatusCode, Json<CreatedForm>), ApiError> {
    let id = form::create_form(&state.pool, state.create_limits(), owner.as_str(), &body.name, &body.description).await?;
    Ok((StatusCode::CREATED, Json(CreatedForm { id })))
}

/// `GET /api/forms`: the owner's forms, newest first.
pub async fn list_forms(State(state): State<AppState>, owner: OwnerId) -> Result<Json<Vec<FormSummary>>, ApiError> {
    Ok(Json(form::list_forms(&state.pool, owner.as_str()).await?))
}

/// `GET /api/forms/stats`
pub async fn form_stats(State(state): State<AppState>, owner: OwnerId) -> Result<Json<FormStats>, ApiError> {
    Ok(Json(form::form_stats(&state.pool, owner.as_str()).await?))
}

/// `GET /api/forms/{id}`
pub async fn get_form(
    State(state): State<AppState>,
    owner: OwnerId,
    Path(form_id): Path<FormId>,
) -> Result<Json<FormRecord>, ApiError> {
    Ok(Json(form::get_form(&state.pool, &state.registry, owner.as_str(), form_id).await?))
}

/// `PUT /api/forms/{id}/content`: replace the element list of a draft.
pub async fn save_content(
    State(state): State<AppState>,
    owner: OwnerId,
    Path(form_id): Path<FormId>,
    Json(body): Json<RawContentBody>,
) -> Result<StatusCode, ApiError> {
    form::save_content(&state.pool, &state.registry, owner.as_str(), form_id, body.elements).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/forms/{id}/publish`
pub async fn publish_form(
    State(state): State<AppState>,
    owner: OwnerId,
    Path(form_id): Path<FormId>,
) -> Result<StatusCode, ApiError> {
    form::publish(&state.pool, owner.as_str(), form_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/forms/{id}/submissions`
pub async fn get_form_with_submissions(
    State(state): State<AppState>,
    owner: OwnerId,
    Path(form_id): Path<FormId>,
) -> Result<Json<FormWithSubmissions>, ApiError> {
    Ok(Json(form::get_form_with_submissions(&state.pool, &state.registry, owner.as_str(), form_id).await?))
}
