//! LLM module: provider HTTP client and completion extraction
//!
//! This module provides:
//! - `LlmClientConfig`, `LlmClient` for talking to OpenAI-compatible chat-completion endpoints
//! - `CompletionBackend`, the seam the reply and contract pipelines call through
//! - `extract_completion`, tolerant extraction of assistant text from a raw provider payload

mod backend;
mod client;
mod extract;

pub use backend::{CompletionBackend, CompletionRequest};
pub use client::{
    LlmClient, LlmClientConfig, DEFAULT_ANALYSIS_MODEL, DEFAULT_BASE_URL, DEFAULT_REPLY_MODEL,
    DEFAULT_TIMEOUT_MS,
};
pub use extract::{extract_completion, ChoiceShape};
