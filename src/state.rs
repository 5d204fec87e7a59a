use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::TokenVerifier;
use crate::database::repository::{ActorRepository, MovieRepository};

/// Shared application state, built once in `main` and injected into every
/// handler and middleware. The pool and verifier are the only process-wide
/// resources.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(pool: PgPool, verifier: TokenVerifier) -> Self {
        Self {
            pool,
            verifier: Arc::new(verifier),
        }
    }

    pub fn movies(&self) -> MovieRepository {
        MovieRepository::new(self.pool.clone())
    }

    pub fn actors(&self) -> ActorRepository {
        ActorRepository::new(self.pool.clone())
    }
}
