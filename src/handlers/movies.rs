//! Movie endpoints. Every successful response, including mutations, carries
//! the full movie list so clients can reconcile state from any reply.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::database::models::{Movie, MovieDraft};
use crate::error::ApiError;
use crate::state::AppState;

use super::{parse_id, parse_payload};

/// GET /api/movies - public
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let movies = state.movies().select_all().await.map_err(|e| {
        tracing::error!(error = %e, "listing movies failed");
        ApiError::Internal
    })?;

    Ok(collection(movies))
}

/// POST /api/movies - requires `post:movies`
pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let draft: MovieDraft = parse_payload(&body, ApiError::BadRequest)?;

    let title = draft
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::BadRequest)?;

    let repo = state.movies();
    repo.insert(title, draft.release_date.as_deref())
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "movie insert failed");
            ApiError::BadRequest
        })?;

    reload(&state).await
}

/// PATCH /api/movies/{id} - requires `patch:movies`
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&raw_id)?;
    let repo = state.movies();

    let mut movie = repo
        .select_by_id(id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, id, "movie lookup failed");
            ApiError::Internal
        })?
        .ok_or(ApiError::NotFound)?;

    // Unknown ids stay 404 even when the payload is also bad.
    movie.apply(parse_payload(&body, ApiError::Unprocessable)?);

    repo.update(&movie).await.map_err(|e| {
        tracing::warn!(error = %e, id, "movie update failed");
        ApiError::Unprocessable
    })?;

    reload(&state).await
}

/// DELETE /api/movies/{id} - requires `delete:movies`
pub async fn remove(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&raw_id)?;
    let repo = state.movies();

    repo.select_by_id(id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, id, "movie lookup failed");
            ApiError::Internal
        })?
        .ok_or(ApiError::NotFound)?;

    repo.delete(id).await.map_err(|e| {
        tracing::warn!(error = %e, id, "movie delete failed");
        ApiError::Unprocessable
    })?;

    reload(&state).await
}

async fn reload(state: &AppState) -> Result<Json<Value>, ApiError> {
    let movies = state.movies().select_all().await.map_err(|e| {
        tracing::error!(error = %e, "reloading movie list failed");
        ApiError::Internal
    })?;
    Ok(collection(movies))
}

fn collection(movies: Vec<Movie>) -> Json<Value> {
    Json(json!({ "success": true, "movies": movies }))
}
