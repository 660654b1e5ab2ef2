//! HTTP surface of the service.
//!
//! - `GET /` describes the service
//! - `GET /no` (and `/no/`) returns a random rejection reason
//! - everything else is a JSON 404
//!
//! Every request, whatever its path, passes the per-client rate limit
//! first.

mod client;
mod error;
mod handlers;
mod routes;

pub use client::client_identifier;
pub use error::ApiError;
pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Config;
use crate::i18n::ReasonStore;
use crate::rate_limit::RateLimiter;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub reasons: Arc<ReasonStore>,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(reasons: ReasonStore, limiter: RateLimiter) -> Self {
        Self {
            reasons: Arc::new(reasons),
            limiter: Arc::new(limiter),
        }
    }

    /// Build state from configuration, loading reasons once.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let reasons = match &config.locales_dir {
            Some(dir) => ReasonStore::load_dir(dir)?,
            None => ReasonStore::embedded()?,
        };
        let limiter = RateLimiter::new(config.rate_limit_max_requests, config.rate_limit_window);
        Ok(Self::new(reasons, limiter))
    }
}

/// Start the web server.
pub async fn serve(config: &Config, state: AppState) -> anyhow::Result<()> {
    if let Some(interval) = config.rate_limit_sweep_interval {
        Arc::clone(&state.limiter).spawn_sweeper(interval);
    }

    let app = create_router(state);

    let addr: SocketAddr = config.socket_addr()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
