use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::{AuthError, TokenVerifier};
use crate::error::ApiError;

/// Per-route state for the permission middleware: which verifier to use and
/// which permission string the route demands.
#[derive(Clone)]
pub struct PermissionGuard {
    verifier: Arc<TokenVerifier>,
    permission: &'static str,
}

impl PermissionGuard {
    pub fn new(verifier: Arc<TokenVerifier>, permission: &'static str) -> Self {
        Self { verifier, permission }
    }
}

/// Authorization interceptor for mutating routes. Rejects with 401 when the
/// token is missing or fails verification, 403 when it verifies but lacks the
/// required permission. On success the decoded claims are forwarded to the
/// handler through request extensions.
pub async fn check_permission(
    State(guard): State<PermissionGuard>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)?;
    let claims = guard.verifier.verify(&token)?;

    if !claims.has_permission(guard.permission) {
        return Err(AuthError::MissingPermission(guard.permission.to_string()).into());
    }

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Pull the raw token out of `Authorization: Bearer <token>`.
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
    let header = headers
        .get("authorization")
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MalformedHeader)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::MalformedHeader);
    }

    Ok(token.to_string())
}
