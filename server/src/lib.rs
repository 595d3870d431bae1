use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use clarity_core::{CompletionBackend, ContractAnalyzer, ReplyAgent};

pub mod contract_handler;
pub mod reply_handler;

pub use contract_handler::contract_rpc_handler;
pub use reply_handler::{telex_handler, ReplyMetadata, ReplyRequest, ReplyResponse};

pub const SERVICE_NAME: &str = "clarity";

#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;

/// Per-process handler state. Read-only; cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub reply_agent: ReplyAgent,
    pub analyzer: ContractAnalyzer,
}

impl AppState {
    pub fn new(backend: Arc<dyn CompletionBackend>, reply_model: impl Into<String>) -> Self {
        Self {
            reply_agent: ReplyAgent::new(Arc::clone(&backend), reply_model),
            analyzer: ContractAnalyzer::new(backend),
        }
    }
}

/// Build the HTTP surface
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/telex", post(telex_handler))
        .route("/a2a/clarity", post(contract_rpc_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "Welcome to Clarity AI 👋" }))
}

/// Static liveness payload
async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": SERVICE_NAME }))
}

pub async fn start_server(addr: std::net::SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!(target: "http", %addr, "Starting Clarity HTTP server");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(target: "http", "Clarity HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(target: "http", error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!(target: "http", "Shutdown signal received");
}
