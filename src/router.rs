//! Route table. Each route composes its interceptor chain explicitly:
//! CORS and trace layers wrap everything, and each mutating method router
//! carries its own permission guard. List endpoints stay public.

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::response::IntoResponse;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::permissions;
use crate::handlers::{actors, movies};
use crate::middleware::{check_permission, PermissionGuard};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(movie_routes(&state))
        .merge(actor_routes(&state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn movie_routes(state: &AppState) -> Router<AppState> {
    let verifier = &state.verifier;

    Router::new()
        .route(
            "/api/movies",
            get(movies::list).merge(post(movies::create).route_layer(from_fn_with_state(
                PermissionGuard::new(verifier.clone(), permissions::POST_MOVIES),
                check_permission,
            ))),
        )
        .route(
            "/api/movies/:id",
            patch(movies::update)
                .route_layer(from_fn_with_state(
                    PermissionGuard::new(verifier.clone(), permissions::PATCH_MOVIES),
                    check_permission,
                ))
                .merge(delete(movies::remove).route_layer(from_fn_with_state(
                    PermissionGuard::new(verifier.clone(), permissions::DELETE_MOVIES),
                    check_permission,
                ))),
        )
}

fn actor_routes(state: &AppState) -> Router<AppState> {
    let verifier = &state.verifier;

    Router::new()
        .route(
            "/api/actors",
            get(actors::list).merge(post(actors::create).route_layer(from_fn_with_state(
                PermissionGuard::new(verifier.clone(), permissions::POST_ACTORS),
                check_permission,
            ))),
        )
        .route(
            "/api/actors/:id",
            patch(actors::update)
                .route_layer(from_fn_with_state(
                    PermissionGuard::new(verifier.clone(), permissions::PATCH_ACTORS),
                    check_permission,
                ))
                .merge(delete(actors::remove).route_layer(from_fn_with_state(
                    PermissionGuard::new(verifier.clone(), permissions::DELETE_ACTORS),
                    check_permission,
                ))),
        )
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "data": {
            "name": "Casting Agency API",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "movies": "/api/movies[/:id]",
                "actors": "/api/actors[/:id]",
                "health": "/health",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": { "status": "ok", "timestamp": now, "database": "ok" }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": { "status": "degraded", "timestamp": now, "database_error": e.to_string() }
            })),
        ),
    }
}
