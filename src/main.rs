use anyhow::{Context, Result};
use no_as_a_service::config::Config;
use no_as_a_service::server::{self, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("no_as_a_service=info".parse()?),
        )
        .init();

    let config = Config::from_env();
    info!(
        "Rate limit: {} requests per {:?} per client",
        config.rate_limit_max_requests, config.rate_limit_window
    );

    let state = AppState::from_config(&config).context("Failed to load reasons")?;
    server::serve(&config, state).await
}
