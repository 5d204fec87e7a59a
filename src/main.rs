use anyhow::Context;
use tracing_subscriber::EnvFilter;

use casting_agency::auth::TokenVerifier;
use casting_agency::config::AppConfig;
use casting_agency::database;
use casting_agency::router::build_router;
use casting_agency::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, AUTH_DOMAIN, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().context("loading configuration")?;

    let pool = database::pool::connect(&config.database)
        .await
        .context("connecting to database")?;
    database::schema::ensure(&pool)
        .await
        .context("ensuring schema")?;

    let http = reqwest::Client::new();
    let verifier = TokenVerifier::discover(&config.auth, &http)
        .await
        .context("loading signing key set")?;

    let state = AppState::new(pool, verifier);
    let app = build_router(state);

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {}", bind_addr))?;

    tracing::info!("casting agency API listening on http://{}", bind_addr);
    axum::serve(listener, app).await.context("server")?;

    Ok(())
}
