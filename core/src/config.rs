use std::net::SocketAddr;

use crate::llm::LlmClientConfig;
use crate::{ClarityError, Result};

pub const DEFAULT_ADDR: &str = "0.0.0.0:8000";

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
        }
    }
}

impl ServerConfig {
    /// `CLARITY_ADDR` sets the full bind address; `PORT` replaces only the port
    pub fn from_env() -> Result<Self> {
        let raw = std::env::var("CLARITY_ADDR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let mut addr: SocketAddr = raw
            .trim()
            .parse()
            .map_err(|e| ClarityError::Config(format!("Invalid CLARITY_ADDR '{raw}': {e}")))?;

        if let Ok(port) = std::env::var("PORT") {
            let port = port
                .trim()
                .parse::<u16>()
                .map_err(|e| ClarityError::Config(format!("Invalid PORT '{port}': {e}")))?;
            addr.set_port(port);
        }

        Ok(Self { addr })
    }
}

/// Everything the service reads from the environment, loaded once at startup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmClientConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            llm: LlmClientConfig::from_env(),
        })
    }
}
