use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod verifier;

pub use verifier::{JwkSet, TokenVerifier};

/// Permission strings required by the mutating endpoints. Tokens are issued by
/// the external identity provider with a subset of these in the `permissions`
/// claim.
pub mod permissions {
    pub const POST_MOVIES: &str = "post:movies";
    pub const PATCH_MOVIES: &str = "patch:movies";
    pub const DELETE_MOVIES: &str = "delete:movies";
    pub const POST_ACTORS: &str = "post:actors";
    pub const PATCH_ACTORS: &str = "patch:actors";
    pub const DELETE_ACTORS: &str = "delete:actors";
}

/// Decoded claim set of a verified token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub aud: Audience,
    pub iat: i64,
    pub exp: i64,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Claims {
    /// Set-membership test against the decoded permission list.
    pub fn has_permission(&self, required: &str) -> bool {
        self.permissions.iter().any(|p| p == required)
    }
}

/// The `aud` claim is a single string or a list of strings depending on how
/// the token was issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization header is missing")]
    MissingHeader,

    #[error("Authorization header must use the Bearer scheme")]
    MalformedHeader,

    #[error("token is malformed")]
    MalformedToken,

    #[error("token header carries no key id")]
    MissingKeyId,

    #[error("no published signing key matches kid '{0}'")]
    UnknownKeyId(String),

    #[error("token algorithm {0} is not permitted")]
    DisallowedAlgorithm(String),

    #[error("token rejected: {0}")]
    InvalidToken(jsonwebtoken::errors::Error),

    #[error("token lacks required permission '{0}'")]
    MissingPermission(String),

    #[error("unusable signing key '{kid}': {reason}")]
    BadKey { kid: String, reason: String },

    #[error("signing key set contains no usable RSA keys")]
    EmptyKeySet,

    #[error("failed to fetch signing key set: {0}")]
    KeyFetch(#[from] reqwest::Error),

    #[error("invalid identity provider url: {0}")]
    InvalidIssuerUrl(#[from] url::ParseError),
}
