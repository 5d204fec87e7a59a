pub mod actors;
pub mod movies;

use axum::body::Bytes;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// The router only matches `/{id}` as a string; a non-integer segment behaves
/// like any other unknown resource.
pub(crate) fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

/// An absent body is an empty draft (clients PATCH with no body to mean
/// "touch nothing"), but a body that is present and unparseable is a client
/// error, not a silent no-op.
pub(crate) fn parse_payload<T>(body: &Bytes, on_invalid: ApiError) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    if body.is_empty() {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(error = %e, "rejecting unparseable request body");
        on_invalid
    })
}
