use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::message::{Message, MessageConfiguration};

pub const JSONRPC_VERSION: &str = "2.0";
pub const METHOD_MESSAGE_SEND: &str = "message/send";

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const INTERNAL_ERROR: i32 = -32603;

/// JSON-RPC 2.0 Request
///
/// `jsonrpc` and `id` are checked on the raw body by `validate`, so they stay optional here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>, // string or number
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl JsonRpcRequest {
    /// Request id of a raw body, if it carries a non-null one
    pub fn raw_id(raw: &Value) -> Option<Value> {
        raw.get("id").filter(|id| !id.is_null()).cloned()
    }

    /// Check `jsonrpc` and `id` on the raw body, before the rest of the envelope
    /// is typed, and hand back the id
    pub fn validate(raw: &Value) -> Result<Value, JsonRpcError> {
        let version_ok = raw.get("jsonrpc").and_then(Value::as_str) == Some(JSONRPC_VERSION);
        match Self::raw_id(raw) {
            Some(id) if version_ok => Ok(id),
            _ => Err(JsonRpcError::invalid_request()),
        }
    }

    pub fn message_send_params(&self) -> serde_json::Result<MessageSendParams> {
        serde_json::from_value(self.params.clone())
    }

    pub fn task_params(&self) -> serde_json::Result<TaskParams> {
        serde_json::from_value(self.params.clone())
    }
}

/// Params of `message/send`: one message, fresh task and context ids
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageSendParams {
    pub message: Message,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<MessageConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl MessageSendParams {
    /// `metadata.model` of the params, else of the message
    pub fn requested_model(&self) -> Option<String> {
        metadata_model(self.metadata.as_ref())
            .or_else(|| metadata_model(self.message.metadata.as_ref()))
    }
}

/// Params of every other method: full history plus optional ids
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskParams {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl TaskParams {
    /// `metadata.model` of the params, else of the last message
    pub fn requested_model(&self) -> Option<String> {
        metadata_model(self.metadata.as_ref()).or_else(|| {
            self.messages
                .last()
                .and_then(|m| metadata_model(m.metadata.as_ref()))
        })
    }
}

fn metadata_model(metadata: Option<&Value>) -> Option<String> {
    let model = metadata?.get("model")?.as_str()?.trim();
    (!model.is_empty()).then(|| model.to_string())
}

/// JSON-RPC 2.0 Response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success<T: Serialize>(id: Value, result: &T) -> serde_json::Result<Self> {
        Ok(Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(serde_json::to_value(result)?),
            error: None,
        })
    }

    pub fn failure(id: Option<Value>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: id.unwrap_or(Value::Null),
            result: None,
            error: Some(error),
        }
    }
}

/// JSON-RPC 2.0 Error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub fn parse_error(details: impl Into<String>) -> Self {
        Self {
            code: PARSE_ERROR,
            message: "Parse error".to_string(),
            data: Some(json!({ "details": details.into() })),
        }
    }

    pub fn invalid_request() -> Self {
        Self {
            code: INVALID_REQUEST,
            message: "Invalid Request: jsonrpc must be '2.0' and id is required".to_string(),
            data: None,
        }
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self {
            code: INTERNAL_ERROR,
            message: "Internal error".to_string(),
            data: Some(json!({ "details": details.into() })),
        }
    }
}
