mod composer;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod matching;
mod pipeline;
mod portfolio;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::composer::Persona;
use crate::config::Config;
use crate::llm_client::AnthropicClient;
use crate::portfolio::chroma::ChromaIndex;
use crate::portfolio::index::PortfolioIndex;
use crate::routes::build_router;
use crate::state::AppState;

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

    info!("Starting outreach API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let model = Arc::new(AnthropicClient::new(config.anthropic_api_key.clone()));
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize the vector-index engine (config-time backend choice)
    let engine = ChromaIndex::connect(&config.chroma_url, &config.chroma_collection).await?;
    let index = Arc::new(PortfolioIndex::new(Arc::new(engine)));

    // Read the tabular portfolio source once
    let projects = portfolio::load_rows(Path::new(&config.portfolio_csv))?;
    info!(
        "Loaded {} portfolio project(s) from {}",
        projects.len(),
        config.portfolio_csv
    );

    // Populate the skill index before the server accepts queries
    index.load(&projects).await?;

    let persona = Persona {
        sender_name: config.sender_name.clone(),
        portfolio_url: config.portfolio_url.clone(),
    };

    // Build app state
    let state = AppState {
        model,
        index,
        projects: Arc::new(projects),
        persona,
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
