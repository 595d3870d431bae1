use serde::{Deserialize, Serialize};

use super::message::{Message, MessagePart};
use super::new_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    Submitted,
    Working,
    InputRequired,
    Completed,
    Canceled,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub state: TaskState,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

impl TaskStatus {
    pub fn new(state: TaskState, message: Option<Message>) -> Self {
        Self {
            state,
            timestamp: chrono::Utc::now().to_rfc3339(),
            message,
        }
    }
}

/// Named fragment of structured output attached to a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    #[serde(default = "new_id")]
    pub artifact_id: String,
    pub name: String,
    pub parts: Vec<MessagePart>,
}

impl Artifact {
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            artifact_id: new_id(),
            name: name.into(),
            parts: vec![MessagePart::text(text)],
        }
    }
}

fn task_kind() -> String {
    "task".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResult {
    pub id: String,
    pub context_id: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
    #[serde(default)]
    pub history: Vec<Message>,
    #[serde(default = "task_kind")]
    pub kind: String,
}

impl TaskResult {
    pub fn new(
        id: impl Into<String>,
        context_id: impl Into<String>,
        status: TaskStatus,
        artifacts: Vec<Artifact>,
        history: Vec<Message>,
    ) -> Self {
        Self {
            id: id.into(),
            context_id: context_id.into(),
            status,
            artifacts,
            history,
            kind: task_kind(),
        }
    }
}
