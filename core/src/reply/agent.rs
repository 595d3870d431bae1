use std::sync::Arc;
use tracing::{debug, warn};

use super::normalizer::{clean_reply, pick_fallback};
use crate::llm::{CompletionBackend, CompletionRequest};
use crate::tone::Tone;
use crate::ClarityError;

pub const REPLY_MAX_TOKENS: u32 = 60;
pub const REPLY_TEMPERATURE: f32 = 0.4;

/// Used when the provider could not be reached at all
pub const UNAVAILABLE_FALLBACKS: [&str; 2] = [
    "Sorry, I couldn't generate a response right now.",
    "I’m having trouble responding — I’ll check this soon.",
];

/// Used when the provider answered without usable content
pub const NO_CONTENT_FALLBACKS: [&str; 3] = [
    "Thanks — I’ll take a look and get back to you.",
    "I’ll review this shortly and reply.",
    "Appreciate the update; I’ll handle it.",
];

/// Writes short, polite, tone-matched replies to inbound messages
#[derive(Clone)]
pub struct ReplyAgent {
    backend: Arc<dyn CompletionBackend>,
    model: String,
}

impl ReplyAgent {
    pub fn new(backend: Arc<dyn CompletionBackend>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate a reply for `message`. Provider failures never escape; a canned
    /// acknowledgement is returned instead.
    pub async fn generate_reply(&self, message: &str, tone: Tone) -> String {
        let request = CompletionRequest::new(reply_prompt(message, tone))
            .with_model(Some(self.model.clone()))
            .with_max_tokens(REPLY_MAX_TOKENS)
            .with_temperature(REPLY_TEMPERATURE);

        match self.backend.complete(request).await {
            Ok(content) if !content.trim().is_empty() => {
                let reply = clean_reply(&content, tone);
                debug!(target: "reply_agent", %tone, reply = %reply, "Reply generated");
                reply
            }
            Ok(_) => {
                warn!(target: "reply_agent", "Provider returned empty content");
                pick_fallback(&NO_CONTENT_FALLBACKS)
            }
            Err(ClarityError::Transport(e)) => {
                warn!(target: "reply_agent", error = %e, "LLM request failed");
                pick_fallback(&UNAVAILABLE_FALLBACKS)
            }
            Err(e) => {
                warn!(target: "reply_agent", error = %e, "No usable content in LLM response");
                pick_fallback(&NO_CONTENT_FALLBACKS)
            }
        }
    }
}

fn reply_prompt(message: &str, tone: Tone) -> String {
    format!(
        r#"
You are a helpful assistant that writes a short, polite, context-aware reply.

Message: "{message}"
Tone: {tone}

Rules:
- Keep the response under 20 words.
- Match the tone (formal, casual, neutral).
- Be context-aware and avoid generic replies (no "Got it" alone).
- Avoid emojis unless the tone is casual.

Reply:
"#
    )
}
