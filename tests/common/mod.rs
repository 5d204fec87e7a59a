#![allow(dead_code)]

//! Shared test harness: a checked-in RSA keypair standing in for the identity
//! provider, token minting helpers, and an in-process router driven through
//! `tower::ServiceExt::oneshot`. Nothing here talks to the network.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

use casting_agency::auth::{Audience, Claims, JwkSet, TokenVerifier};
use casting_agency::router::build_router;
use casting_agency::state::AppState;

pub const ISSUER: &str = "https://casting-agency.test/";
pub const AUDIENCE: &str = "casting";
pub const KID: &str = "test-key-1";

/// Private half of the test signing key. The public components below are the
/// matching JWKS entry.
const SIGNING_KEY_PEM: &str = include_str!("../fixtures/jwt_signing_key.pem");

const RSA_N: &str = "hhItJjTHfL1Q2FKOvj6FXBAtbYq9hurFwbr_73ybAd1y50KUXbFtLvL3i9DMbL1mW9x7g4EaTp5v4N_2jiUIaN8bi2BnX3-XeQM3rYi-p1-sfpXJX2kFEudkg_s8Kyhiff20cce79L986hkUmbOe3HET7iUWLGzD5MH2WrRAWq74j02ohcRMw1xx08vY1VzaFEZlP8_cxhoiqbff-cSsFhKs7HVaizcDuDCzivJxovzEZ2QuTQC3l6AzsuEx6MR6Dtn_I4-qBRHyQm6s3LpYWsSzg0_x6mMuRarsYg-iuduBhjwpA0fLt3kPUi6bsQjrRPDHyyuveMq9ByRYB7TY2w";
const RSA_E: &str = "AQAB";

pub fn test_jwks() -> JwkSet {
    serde_json::from_value(serde_json::json!({
        "keys": [{
            "kty": "RSA",
            "kid": KID,
            "alg": "RS256",
            "use": "sig",
            "n": RSA_N,
            "e": RSA_E,
        }]
    }))
    .expect("test jwks")
}

pub fn verifier() -> TokenVerifier {
    TokenVerifier::from_jwks(&test_jwks(), ISSUER, AUDIENCE).expect("test verifier")
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_secs() as i64
}

fn claims(audience: &str, exp: i64, permissions: &[&str]) -> Claims {
    Claims {
        iss: ISSUER.to_string(),
        sub: "auth0|tester".to_string(),
        aud: Audience::One(audience.to_string()),
        iat: now_secs(),
        exp,
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
    }
}

fn rs256_header(kid: &str) -> Header {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(kid.to_string());
    header
}

/// A token the verifier accepts, carrying the given permissions.
pub fn mint_token(permissions: &[&str]) -> String {
    let key = EncodingKey::from_rsa_pem(SIGNING_KEY_PEM.as_bytes()).expect("signing key");
    encode(&rs256_header(KID), &claims(AUDIENCE, now_secs() + 3600, permissions), &key)
        .expect("token")
}

/// Validly signed but expired well past any leeway.
pub fn mint_expired_token(permissions: &[&str]) -> String {
    let key = EncodingKey::from_rsa_pem(SIGNING_KEY_PEM.as_bytes()).expect("signing key");
    encode(&rs256_header(KID), &claims(AUDIENCE, now_secs() - 3600, permissions), &key)
        .expect("token")
}

/// Validly signed for a different audience.
pub fn mint_wrong_audience_token(permissions: &[&str]) -> String {
    let key = EncodingKey::from_rsa_pem(SIGNING_KEY_PEM.as_bytes()).expect("signing key");
    encode(&rs256_header(KID), &claims("someone-else", now_secs() + 3600, permissions), &key)
        .expect("token")
}

/// Validly signed but under a key id the verifier has never seen.
pub fn mint_unknown_kid_token(permissions: &[&str]) -> String {
    let key = EncodingKey::from_rsa_pem(SIGNING_KEY_PEM.as_bytes()).expect("signing key");
    encode(
        &rs256_header("rotated-away"),
        &claims(AUDIENCE, now_secs() + 3600, permissions),
        &key,
    )
    .expect("token")
}

/// Shared-secret token: exercises the algorithm downgrade guard.
pub fn mint_hs256_token(permissions: &[&str]) -> String {
    let mut header = Header::new(Algorithm::HS256);
    header.kid = Some(KID.to_string());
    encode(
        &header,
        &claims(AUDIENCE, now_secs() + 3600, permissions),
        &EncodingKey::from_secret(b"not-a-real-secret"),
    )
    .expect("token")
}

/// App over a lazily-connected pool pointing nowhere. Good for every path
/// that must be decided before (or instead of) touching the database.
pub fn app_without_database() -> Router {
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(2))
        .connect_lazy("postgres://nobody@127.0.0.1:1/unreachable")
        .expect("lazy pool");
    build_router(AppState::new(pool, verifier()))
}

/// App over the real database named by DATABASE_URL, or `None` to skip the
/// test when the environment has no database.
pub async fn app_with_database() -> Result<Option<(Router, PgPool)>> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(None);
    };

    let pool = PgPoolOptions::new().max_connections(5).connect(&url).await?;
    casting_agency::database::schema::ensure(&pool).await?;

    let app = build_router(AppState::new(pool.clone(), verifier()));
    Ok(Some((app, pool)))
}

pub fn request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

/// Like `request`, but sends the body verbatim. Lets a test put something on
/// the wire that `serde_json::Value` could never produce.
pub fn request_raw(method: &str, uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

/// Drive one request through the router and decode the JSON reply.
pub async fn call(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.expect("infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

/// A title/name unlikely to collide with rows left by earlier runs.
pub fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    format!("{} {}", prefix, nanos)
}
