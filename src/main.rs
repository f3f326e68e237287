//! BrasilConnect - virtual number service backend
//!
//! Serves the in-memory application state over HTTP and forwards assistant
//! questions to a hosted model.

mod api;
mod assistant;
mod llm;
mod model;
mod number;
mod runtime;
mod state_machine;
mod system_prompt;

use api::{create_router, ApiState};
use assistant::AssistantGateway;
use chrono::Utc;
use llm::{GeminiService, LlmConfig, LoggingService};
use runtime::{AppRuntime, RandomNumberSource, TokioClock};
use state_machine::{AppContext, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brasilconnect=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let port: u16 = std::env::var("BRASILCONNECT_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    let llm_config = LlmConfig::from_env();
    if llm_config.api_key.is_none() {
        tracing::warn!("No Gemini API key configured. Set GEMINI_API_KEY; assistant replies will fall back.");
    }

    // Assistant gateway
    let gemini = GeminiService::new(&llm_config)?;
    tracing::info!(model = %llm_config.model, "Assistant gateway initialized");
    let llm = Arc::new(LoggingService::new(Arc::new(gemini)));
    let assistant = AssistantGateway::new(llm);

    // Application runtime
    let (runtime, handle) = AppRuntime::new(
        AppContext::default(),
        AppState::initial(Utc::now()),
        TokioClock,
        assistant,
        RandomNumberSource,
    );
    tokio::spawn(runtime.run());

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new().gzip(true).br(true);

    let app = create_router(ApiState::new(handle))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(compression);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("BrasilConnect server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
