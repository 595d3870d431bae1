//! Short tone-matched replies
//!
//! - `clean_reply` normalizes raw model output into a short, never-empty reply
//! - `ReplyAgent` prompts the provider and degrades to a canned acknowledgement on failure

mod agent;
mod normalizer;

pub use agent::{
    ReplyAgent, NO_CONTENT_FALLBACKS, REPLY_MAX_TOKENS, REPLY_TEMPERATURE, UNAVAILABLE_FALLBACKS,
};
pub use normalizer::{clean_reply, pick_fallback, CLEAN_FALLBACKS, ELLIPSIS, MAX_REPLY_WORDS};
