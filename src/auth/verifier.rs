//! Token verification against the identity provider's published key set.
//!
//! The key set is fetched once at startup; verification itself is pure CPU
//! work and happens on every protected request. Only RS256 is accepted so a
//! token signed with a shared-secret scheme can never slip through.

use std::collections::HashMap;

use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::auth::{AuthError, Claims};
use crate::config::AuthConfig;

/// One published key from the identity provider's JWKS document. Fields we
/// don't use are ignored during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct Jwk {
    pub kty: String,
    pub kid: String,
    #[serde(default)]
    pub alg: Option<String>,
    #[serde(rename = "use", default)]
    pub usage: Option<String>,
    #[serde(default)]
    pub n: Option<String>,
    #[serde(default)]
    pub e: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

/// Verifies bearer tokens against the loaded signing-key set.
pub struct TokenVerifier {
    issuer: String,
    audience: String,
    keys: HashMap<String, DecodingKey>,
}

// DecodingKey is opaque; show only which kids are loaded.
impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("kids", &self.keys.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl TokenVerifier {
    /// Build a verifier from an already-parsed key set. Non-RSA keys and keys
    /// published for a different algorithm are skipped.
    pub fn from_jwks(
        jwks: &JwkSet,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Result<Self, AuthError> {
        let mut keys = HashMap::new();

        for jwk in &jwks.keys {
            if jwk.kty != "RSA" {
                continue;
            }
            if matches!(jwk.alg.as_deref(), Some(alg) if alg != "RS256") {
                continue;
            }
            if matches!(jwk.usage.as_deref(), Some(usage) if usage != "sig") {
                continue;
            }
            let (Some(n), Some(e)) = (jwk.n.as_deref(), jwk.e.as_deref()) else {
                continue;
            };

            let key = DecodingKey::from_rsa_components(n, e).map_err(|e| AuthError::BadKey {
                kid: jwk.kid.clone(),
                reason: e.to_string(),
            })?;
            keys.insert(jwk.kid.clone(), key);
        }

        if keys.is_empty() {
            return Err(AuthError::EmptyKeySet);
        }

        Ok(Self {
            issuer: issuer.into(),
            audience: audience.into(),
            keys,
        })
    }

    /// Fetch the signing-key set from the identity provider and build a
    /// verifier for its issuer/audience pair.
    pub async fn discover(auth: &AuthConfig, http: &reqwest::Client) -> Result<Self, AuthError> {
        let endpoint = auth.jwks_endpoint()?;
        tracing::info!(%endpoint, "fetching signing key set");

        let jwks: JwkSet = http
            .get(endpoint)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Self::from_jwks(&jwks, auth.issuer(), auth.audience.clone())
    }

    /// Verify signature, algorithm, expiry, issuer, and audience, returning
    /// the decoded claim set. Permission checks happen in the middleware, not
    /// here.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::MalformedToken)?;

        if header.alg != Algorithm::RS256 {
            return Err(AuthError::DisallowedAlgorithm(format!("{:?}", header.alg)));
        }

        let kid = header.kid.ok_or(AuthError::MissingKeyId)?;
        let key = self
            .keys
            .get(&kid)
            .ok_or_else(|| AuthError::UnknownKeyId(kid.clone()))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.audience.as_str()]);
        validation.set_issuer(&[self.issuer.as_str()]);

        let data = decode::<Claims>(token, key, &validation).map_err(AuthError::InvalidToken)?;
        Ok(data.claims)
    }
}
