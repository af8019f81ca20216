mod chat;
mod config;
mod errors;
mod jobs;
mod llm_client;
mod model;
mod prediction;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::model::ModelArtifact;
use crate::prediction::RolePredictor;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting careerpath v{}", env!("CARGO_PKG_VERSION"));

    // The service cannot run without its model; a load failure aborts startup.
    let artifact = ModelArtifact::load(&config.model_path).with_context(|| {
        format!(
            "failed to load model artifact from {}",
            config.model_path.display()
        )
    })?;
    info!(
        "Model loaded: {} roles, {} interests, {} training rows",
        artifact.label_encoder.len(),
        artifact.interest_encoder.len(),
        artifact.training_labels.len()
    );
    let predictor = Arc::new(RolePredictor::new(artifact, config.prediction_threshold));

    let mut chat = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.chat_timeout,
    )?;
    if let Some(base_url) = &config.gemini_base_url {
        chat = chat.with_base_url(base_url.clone());
    }
    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; chat requests will fail until it is provided");
    }
    info!("LLM client initialized (model: {})", chat.model());

    let state = AppState {
        predictor,
        chat: Arc::new(chat),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
