//! Actor endpoints. Same shape as the movie set: mutations respond with the
//! full actor list.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::database::models::{Actor, ActorDraft};
use crate::error::ApiError;
use crate::state::AppState;

use super::{parse_id, parse_payload};

/// GET /api/actors - public
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let actors = state.actors().select_all().await.map_err(|e| {
        tracing::error!(error = %e, "listing actors failed");
        ApiError::Internal
    })?;

    Ok(collection(actors))
}

/// POST /api/actors - requires `post:actors`
pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let draft: ActorDraft = parse_payload(&body, ApiError::BadRequest)?;

    let name = draft
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or(ApiError::BadRequest)?;

    let repo = state.actors();
    repo.insert(name, draft.gender.as_deref(), draft.age)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "actor insert failed");
            ApiError::BadRequest
        })?;

    reload(&state).await
}

/// PATCH /api/actors/{id} - requires `patch:actors`
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&raw_id)?;
    let repo = state.actors();

    let mut actor = repo
        .select_by_id(id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, id, "actor lookup failed");
            ApiError::Internal
        })?
        .ok_or(ApiError::NotFound)?;

    // Unknown ids stay 404 even when the payload is also bad.
    actor.apply(parse_payload(&body, ApiError::Unprocessable)?);

    repo.update(&actor).await.map_err(|e| {
        tracing::warn!(error = %e, id, "actor update failed");
        ApiError::Unprocessable
    })?;

    reload(&state).await
}

/// DELETE /api/actors/{id} - requires `delete:actors`
pub async fn remove(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&raw_id)?;
    let repo = state.actors();

    repo.select_by_id(id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, id, "actor lookup failed");
            ApiError::Internal
        })?
        .ok_or(ApiError::NotFound)?;

    repo.delete(id).await.map_err(|e| {
        tracing::warn!(error = %e, id, "actor delete failed");
        ApiError::Unprocessable
    })?;

    reload(&state).await
}

async fn reload(state: &AppState) -> Result<Json<Value>, ApiError> {
    let actors = state.actors().select_all().await.map_err(|e| {
        tracing::error!(error = %e, "reloading actor list failed");
        ApiError::Internal
    })?;
    Ok(collection(actors))
}

fn collection(actors: Vec<Actor>) -> Json<Value> {
    Json(json!({ "success": true, "actors": actors }))
}
