use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use clarity_core::{detect_tone, Tone};

use crate::AppState;

pub const SEND_MESSAGE_ACTION: &str = "send_message";

/// Inbound Telex message. A missing or null `text` reads as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplyRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyMetadata {
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyResponse {
    pub text: String,
    pub action: String,
    pub metadata: ReplyMetadata,
}

/// Detect the sender's tone and answer with a short reply in kind.
/// The body is read as JSON whatever its `Content-Type`; only a body that is not a
/// JSON object is rejected. Provider failures are absorbed by the reply agent.
pub async fn telex_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let req: ReplyRequest = match serde_json::from_slice::<serde_json::Value>(&body) {
        Ok(value) if value.is_object() => match serde_json::from_value(value) {
            Ok(req) => req,
            Err(e) => return bad_request(e.to_string()),
        },
        Ok(_) => return bad_request("body must be a JSON object".to_string()),
        Err(e) => return bad_request(e.to_string()),
    };
    let text = req.text.unwrap_or_default();

    let tone = detect_tone(&text);
    debug!(target: "http", %tone, chars = text.chars().count(), "Telex message received");

    let reply = state.reply_agent.generate_reply(&text, tone).await;

    Json(ReplyResponse {
        text: reply,
        action: SEND_MESSAGE_ACTION.to_string(),
        metadata: ReplyMetadata { tone },
    })
    .into_response()
}

fn bad_request(details: String) -> Response {
    warn!(target: "http", %details, "Unreadable Telex body");
    (StatusCode::BAD_REQUEST, Json(json!({ "error": details }))).into_response()
}
