//! BoweryConnect crisis API
//!
//! HTTP service that triages crisis-support chat messages for people
//! experiencing homelessness, answering immediately for explicit danger and
//! otherwise through an LLM with context-aware prompting.

mod api;
mod catalog;
mod config;
mod llm;
mod shutdown;
mod triage;

use api::{create_router, AppState};
use catalog::Catalog;
use config::ServiceConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use triage::CrisisOrchestrator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bowery_connect=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = ServiceConfig::from_env()?;

    let catalog = match &config.catalog_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading catalog from file");
            Catalog::load(path)?
        }
        None => Catalog::builtin()?,
    };
    tracing::info!(
        resource_categories = ?catalog.resource_categories(),
        tip_categories = ?catalog.tip_categories(),
        "Catalog loaded"
    );

    let llm = llm::build_service(&config.llm)?;
    tracing::info!(model = %llm.model_id(), "LLM service ready");

    let orchestrator = CrisisOrchestrator::new(llm, Arc::new(catalog), config.llm.decoding);
    let state = AppState::new(orchestrator, &config.service_name);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(service = %config.service_name, "Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
