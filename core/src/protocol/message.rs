use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::new_id;

pub const TEXT_KIND: &str = "text";

fn message_kind() -> String {
    "message".to_string()
}

fn text_kind() -> String {
    TEXT_KIND.to_string()
}

/// One fragment of a message. Only `text` parts are read by the pipelines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagePart {
    #[serde(default = "text_kind")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

impl MessagePart {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: text_kind(),
            text: Some(text.into()),
            data: None,
            file_url: None,
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind == TEXT_KIND
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default = "message_kind")]
    pub kind: String,
    pub role: String,
    #[serde(default)]
    pub parts: Vec<MessagePart>,
    #[serde(default = "new_id")]
    pub message_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl Message {
    pub fn new(role: impl Into<String>, parts: Vec<MessagePart>) -> Self {
        Self {
            kind: message_kind(),
            role: role.into(),
            parts,
            message_id: new_id(),
            task_id: None,
            metadata: None,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new("user", vec![MessagePart::text(text)])
    }

    pub fn agent(text: impl Into<String>, task_id: impl Into<String>) -> Self {
        let mut message = Self::new("agent", vec![MessagePart::text(text)]);
        message.task_id = Some(task_id.into());
        message
    }

    /// Trimmed content of the first `text` part, if it has any
    pub fn first_text(&self) -> Option<&str> {
        let part = self.parts.iter().find(|p| p.is_text())?;
        let text = part.text.as_deref()?.trim();
        (!text.is_empty()).then_some(text)
    }
}

/// Client preferences sent along with `message/send`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageConfiguration {
    pub accepted_output_modes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_length: Option<u32>,
    pub blocking: bool,
}
