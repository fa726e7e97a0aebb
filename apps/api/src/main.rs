mod config;
mod cv;
mod errors;
mod extraction;
mod llm_client;
mod render;
mod routes;
mod state;
mod structuring;
mod typeset;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::structuring::LlmCvStructurer;
use crate::typeset::PdfLatexCompiler;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cvtex v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())
        .context("Failed to build HTTP client for the LLM API")?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let compiler = PdfLatexCompiler::from_config(&config);
    info!(
        "LaTeX compiler: {} ({} passes, {}s timeout)",
        config.latex_cmd, config.latex_passes, config.latex_timeout_secs
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        structurer: Arc::new(LlmCvStructurer::new(llm)),
        compiler: Arc::new(compiler),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
