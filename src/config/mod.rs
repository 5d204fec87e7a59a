use std::env;

use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

/// Identity provider settings. Token issuance is delegated entirely to the
/// provider; the API only needs to know where the signing keys live and which
/// issuer/audience pair to accept.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Provider domain, e.g. `casting-agency.auth0.com`.
    pub domain: String,
    /// Expected `aud` claim.
    pub audience: String,
    /// Explicit JWKS URL. When unset, derived from the domain.
    pub jwks_url: Option<String>,
}

impl AppConfig {
    /// Load configuration from the environment. `.env` is loaded by `main`
    /// before this runs.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            port: parsed_var("PORT", 8080)?,
            database: DatabaseConfig {
                url: required_var("DATABASE_URL")?,
                max_connections: parsed_var("DATABASE_MAX_CONNECTIONS", 5)?,
                connect_timeout_secs: parsed_var("DATABASE_CONNECT_TIMEOUT_SECS", 30)?,
            },
            auth: AuthConfig {
                domain: required_var("AUTH_DOMAIN")?,
                audience: required_var("AUTH_AUDIENCE")?,
                jwks_url: env::var("AUTH_JWKS_URL").ok(),
            },
        })
    }
}

impl AuthConfig {
    /// Expected `iss` claim: the provider domain as an https URL with a
    /// trailing slash, the form identity providers put in their tokens.
    pub fn issuer(&self) -> String {
        let bare = self
            .domain
            .trim_start_matches("https://")
            .trim_end_matches('/');
        format!("https://{}/", bare)
    }

    /// Where the signing-key set is published.
    pub fn jwks_endpoint(&self) -> Result<Url, url::ParseError> {
        match &self.jwks_url {
            Some(explicit) => Url::parse(explicit),
            None => Url::parse(&self.issuer())?.join(".well-known/jwks.json"),
        }
    }
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn parsed_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
