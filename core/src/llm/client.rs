use crate::{ClarityError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, warn};

use super::backend::{CompletionBackend, CompletionRequest};
use super::extract::extract_completion;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_ANALYSIS_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_REPLY_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Provider credentials and defaults, loaded once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct LlmClientConfig {
    pub base_url: String, // e.g., https://api.groq.com/openai/v1
    pub api_key: Option<String>,
    pub model: String,       // analysis model
    pub reply_model: String, // short reply model
    pub request_timeout_ms: u64,
}

impl Default for LlmClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_ANALYSIS_MODEL.to_string(),
            reply_model: DEFAULT_REPLY_MODEL.to_string(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl LlmClientConfig {
    /// Read provider settings from the process environment, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env_non_empty("GROQ_BASE_URL").unwrap_or(defaults.base_url),
            api_key: env_non_empty("GROQ_API_KEY"),
            model: env_non_empty("GROQ_MODEL").unwrap_or(defaults.model),
            reply_model: env_non_empty("GROQ_REPLY_MODEL").unwrap_or(defaults.reply_model),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(defaults.request_timeout_ms),
        }
    }

    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// HTTP client for an OpenAI-compatible chat-completions endpoint
#[derive(Clone)]
pub struct LlmClient {
    pub(crate) http: Client,
    pub(crate) cfg: LlmClientConfig,
}

impl LlmClient {
    pub fn new(cfg: LlmClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(cfg.request_timeout_ms))
            .build()
            .map_err(|e| ClarityError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http, cfg })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(LlmClientConfig::from_env())
    }

    pub fn config(&self) -> &LlmClientConfig {
        &self.cfg
    }

    /// Issue one chat-completion call and return the assistant text.
    /// Contract:
    /// - Input: prompt, optional system message, model (configured default when None)
    /// - Output: assistant content from the first choice
    /// - Error: Transport on network/timeout, Provider on `{error}` bodies,
    ///   UnexpectedResponse when no known shape matched
    pub async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let model = request.model.as_deref().unwrap_or(&self.cfg.model);
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system.as_deref() {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.prompt,
        });
        let body = ChatCompletionBody {
            model,
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let url = self.cfg.chat_completions_url();
        debug!(target: "llm_client", %url, %model, "POST chat completion");

        let mut req = self
            .http
            .post(&url)
            .header("content-type", "application/json");
        if let Some(key) = &self.cfg.api_key {
            req = req.bearer_auth(key);
        } else {
            warn!(target: "llm_client", "No API key configured; sending unauthenticated request");
        }

        let resp = req.json(&body).send().await.map_err(|e| {
            error!(target: "llm_client", error = %e, "Chat completion request failed");
            ClarityError::from(e)
        })?;
        let status = resp.status();
        let text = resp.text().await?;

        let raw: Value = match serde_json::from_str(&text) {
            Ok(v) => v,
            Err(e) => {
                error!(target: "llm_client", %status, error = %e, "Provider body is not JSON");
                return Err(ClarityError::UnexpectedResponse(Value::String(text)));
            }
        };
        debug!(target: "llm_client", %status, raw = %raw, "LLM provider raw response");

        extract_completion(&raw)
    }
}

#[async_trait]
impl CompletionBackend for LlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        LlmClient::complete(self, &request).await
    }
}
