mod config;
mod errors;
mod llm_client;
mod models;
mod portfolio;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::portfolio::generator::{Backend, PortfolioGenerator};
use crate::portfolio::workspace::Workspace;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values, not on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the generation backend
    let backend = build_backend(&config)?;
    let generator = Arc::new(PortfolioGenerator::new(backend));

    let state = AppState {
        generator,
        workspace: Arc::new(Workspace::default()),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the form frontend has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the LLM client, or an unconfigured backend when no API key is set.
fn build_backend(config: &Config) -> Result<Backend> {
    let Some(api_key) = config.api_key.clone() else {
        warn!(
            "{} is not set; generation requests will return a configuration notice",
            config.provider.api_key_var()
        );
        return Ok(Backend::Unconfigured {
            provider: config.provider,
        });
    };

    let client = LlmClient::new(
        config.provider,
        api_key,
        config.model.clone(),
        config.base_url.clone(),
        Duration::from_secs(config.timeout_secs),
    )?;
    info!(
        "LLM client initialized (provider: {}, model: {})",
        config.provider, config.model
    );

    Ok(Backend::Ready(Arc::new(client)))
}
