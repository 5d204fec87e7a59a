// HTTP API error types
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use thiserror::Error;

use crate::auth::AuthError;

/// The full error taxonomy of the API. Every failure path terminates in one of
/// these variants; the response body is always
/// `{"success": false, "error": <status>, "message": <text>}`.
///
/// Messages are fixed per variant. The underlying cause is logged where the
/// conversion happens, never sent to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 400 - bad input or create failure
    #[error("request failed")]
    BadRequest,

    /// 401 - missing, malformed, expired, or otherwise invalid token
    #[error("Unauthorized client error")]
    Unauthorized,

    /// 403 - valid token, insufficient permission
    #[error("Forbidden request. Please contact your administrator.")]
    Forbidden,

    /// 404 - id lookup miss
    #[error("resource not found")]
    NotFound,

    /// 422 - update/delete persistence failure
    #[error("unprocessable request")]
    Unprocessable,

    /// 500 - serialization or unexpected failure
    #[error("Internal server error.")]
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": self.status_code().as_u16(),
            "message": self.to_string(),
        })
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingPermission(permission) => {
                tracing::warn!(%permission, "request rejected: insufficient permission");
                ApiError::Forbidden
            }
            other => {
                tracing::warn!(error = %other, "request rejected: token verification failed");
                ApiError::Unauthorized
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
