/// Completion extraction from raw provider payloads
///
/// Providers drift between response layouts, so the first choice is matched against an
/// ordered list of known shapes until one yields text.
use crate::{ClarityError, Result};
use serde_json::Value;

/// Known layouts of `choices[0]`, in the order they are attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceShape {
    /// `{"message": {"content": "..."}}`
    MessageContent,
    /// `{"message": {"content": ["...", {"text": "..."}]}}`
    MessageContentFragments,
    /// `{"text": "..."}`
    ChoiceText,
    /// `{"message": {"content": {"text": "..."}}}` or `{"message": {"text": "..."}}`
    MessageMember,
    /// `{"message": "..."}`
    BareMessage,
}

impl ChoiceShape {
    pub const ORDER: [ChoiceShape; 5] = [
        ChoiceShape::MessageContent,
        ChoiceShape::MessageContentFragments,
        ChoiceShape::ChoiceText,
        ChoiceShape::MessageMember,
        ChoiceShape::BareMessage,
    ];

    pub fn extract(&self, choice: &Value) -> Option<String> {
        match self {
            ChoiceShape::MessageContent => choice
                .get("message")?
                .get("content")?
                .as_str()
                .map(str::to_string),
            ChoiceShape::MessageContentFragments => {
                let fragments = choice.get("message")?.get("content")?.as_array()?;
                let joined = fragments
                    .iter()
                    .filter_map(fragment_text)
                    .collect::<Vec<_>>()
                    .join(" ");
                Some(joined)
            }
            ChoiceShape::ChoiceText => choice.get("text")?.as_str().map(str::to_string),
            ChoiceShape::MessageMember => {
                let message = choice.get("message")?;
                if let Some(content) = message.get("content").filter(|c| c.is_object()) {
                    if let Some(s) = content
                        .get("text")
                        .or_else(|| content.get("content"))
                        .and_then(Value::as_str)
                    {
                        return Some(s.to_string());
                    }
                }
                message.get("text")?.as_str().map(str::to_string)
            }
            ChoiceShape::BareMessage => choice.get("message")?.as_str().map(str::to_string),
        }
    }
}

fn fragment_text(fragment: &Value) -> Option<String> {
    match fragment {
        Value::String(s) => Some(s.clone()),
        Value::Object(_) => fragment
            .get("text")
            .and_then(Value::as_str)
            .map(str::to_string),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Pull the assistant text out of a chat-completion payload.
///
/// Falls back to the provider's `error.message` (ProviderError), then to
/// UnexpectedResponse carrying the whole payload.
pub fn extract_completion(raw: &Value) -> Result<String> {
    if let Some(choice) = raw
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
    {
        if let Some(text) = ChoiceShape::ORDER
            .iter()
            .find_map(|shape| shape.extract(choice))
        {
            return Ok(text);
        }
    }

    if let Some(err) = raw.get("error").filter(|e| e.is_object()) {
        let message = err
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown provider error");
        return Err(ClarityError::Provider(message.to_string()));
    }

    Err(ClarityError::UnexpectedResponse(raw.clone()))
}
