// Clarity Core Library
// Tone-matched replies and contract analysis on top of an OpenAI-compatible LLM provider

pub mod config;
pub mod contract;
pub mod llm;
pub mod protocol;
pub mod reply;
pub mod telemetry;
pub mod tone;

// Export core types
pub use config::{AppConfig, ServerConfig};
pub use contract::{AnalysisResult, ContractAnalyzer};
pub use llm::{CompletionBackend, CompletionRequest, LlmClient, LlmClientConfig};
pub use protocol::{
    Artifact, JsonRpcError, JsonRpcRequest, JsonRpcResponse, Message, MessageConfiguration,
    MessagePart, TaskResult, TaskState, TaskStatus,
};
pub use reply::{clean_reply, ReplyAgent};
pub use tone::{detect_tone, Tone};

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClarityError {
    /// The inbound message carried no usable text
    #[error("{0}")]
    Input(String),

    /// The provider answered with an explicit `error` object
    #[error("LLM provider error: {0}")]
    Provider(String),

    /// The provider answered with something we could not read a completion from
    #[error("Unexpected LLM provider response: {0}")]
    UnexpectedResponse(serde_json::Value),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ClarityError {
    fn from(err: reqwest::Error) -> Self {
        ClarityError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClarityError>;
