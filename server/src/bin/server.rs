use std::sync::Arc;
use tracing::{info, warn};

use clarity_core::telemetry::init_tracing;
use clarity_core::{AppConfig, LlmClient};
use clarity_server::{start_server, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional; real environment variables win
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    if config.llm.api_key.is_none() {
        warn!("GROQ_API_KEY is not set; provider calls will be rejected");
    }
    info!(
        analysis_model = %config.llm.model,
        reply_model = %config.llm.reply_model,
        timeout_ms = config.llm.request_timeout_ms,
        "Provider configured"
    );

    let client = Arc::new(LlmClient::new(config.llm.clone())?);
    let state = AppState::new(client, config.llm.reply_model.clone());

    start_server(config.server.addr, state).await?;
    Ok(())
}
