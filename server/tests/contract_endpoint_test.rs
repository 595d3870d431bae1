mod common;

use axum::http::StatusCode;
use common::{app, post_json, post_raw, StubBackend};
use serde_json::{json, Value};

use clarity_core::ClarityError;

const NDA_ANALYSIS: &str = r#"{
    "contract_type": "NDA",
    "ambiguous_terms": [],
    "risk_clauses": ["Unlimited liability"],
    "simplified_summary": "A mutual NDA.",
    "recommendations": "Cap liability."
}"#;

fn send_message(id: Value, text: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "message/send",
        "params": {
            "message": {
                "kind": "message",
                "role": "user",
                "parts": [{ "kind": "text", "text": text }],
                "messageId": "m-1"
            },
            "configuration": { "blocking": true, "acceptedOutputModes": ["text/plain"] }
        }
    })
}

#[tokio::test]
async fn missing_jsonrpc_version_is_invalid_request() {
    let backend = StubBackend::replying(NDA_ANALYSIS);
    let (status, body) = post_json(
        app(backend.clone()),
        "/a2a/clarity",
        &json!({ "id": 1, "method": "message/send", "params": {} }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["id"], 1);
    assert_eq!(body["error"]["code"], -32600);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn wrong_version_keeps_caller_id() {
    let (status, body) = post_json(
        app(StubBackend::replying(NDA_ANALYSIS)),
        "/a2a/clarity",
        &json!({ "jsonrpc": "1.0", "id": "abc", "method": "message/send" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["id"], "abc");
    assert_eq!(body["error"]["code"], -32600);
}

#[tokio::test]
async fn mistyped_method_is_internal_error_with_id() {
    let backend = StubBackend::replying(NDA_ANALYSIS);
    let (status, body) = post_json(
        app(backend.clone()),
        "/a2a/clarity",
        &json!({ "jsonrpc": "2.0", "id": 1, "method": 7 }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["id"], 1);
    assert_eq!(body["error"]["code"], -32603);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn missing_id_is_invalid_request() {
    let (status, body) = post_json(
        app(StubBackend::replying(NDA_ANALYSIS)),
        "/a2a/clarity",
        &json!({ "jsonrpc": "2.0", "method": "message/send" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["id"], Value::Null);
    assert_eq!(body["error"]["code"], -32600);
}

#[tokio::test]
async fn non_object_envelope_is_invalid_request() {
    let (status, body) = post_json(
        app(StubBackend::replying(NDA_ANALYSIS)),
        "/a2a/clarity",
        &json!([1, 2, 3]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], -32600);
}

#[tokio::test]
async fn unparseable_body_is_parse_error() {
    let (status, body) = post_raw(
        app(StubBackend::replying(NDA_ANALYSIS)),
        "/a2a/clarity",
        "{ not json",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["id"], Value::Null);
    assert_eq!(body["error"]["code"], -32700);
}

#[tokio::test]
async fn empty_contract_text_is_internal_error() {
    let backend = StubBackend::replying(NDA_ANALYSIS);
    let (status, body) = post_json(
        app(backend.clone()),
        "/a2a/clarity",
        &send_message(json!("req-7"), ""),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["id"], "req-7");
    assert_eq!(body["error"]["code"], -32603);
    assert_eq!(body["error"]["message"], "Internal error");
    let details = body["error"]["data"]["details"].as_str().unwrap();
    assert!(details.contains("No contract text provided"));
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn nda_is_classified() {
    let backend = StubBackend::replying(NDA_ANALYSIS);
    let (status, body) = post_json(
        app(backend.clone()),
        "/a2a/clarity",
        &send_message(json!(42), "This Non-Disclosure Agreement is entered into by..."),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["id"], 42);
    assert!(body.get("error").is_none());

    let result = &body["result"];
    assert_eq!(result["kind"], "task");
    assert_eq!(result["status"]["state"], "completed");
    assert!(result["id"].as_str().is_some_and(|s| !s.is_empty()));
    assert!(result["contextId"].as_str().is_some_and(|s| !s.is_empty()));

    let artifacts = result["artifacts"].as_array().unwrap();
    assert_eq!(artifacts.len(), 2);
    assert_eq!(artifacts[0]["name"], "classification");
    assert_eq!(artifacts[0]["parts"][0]["text"], "NDA");
    assert_eq!(artifacts[1]["name"], "analysis");
    assert_eq!(artifacts[1]["parts"][0]["text"], NDA_ANALYSIS);

    let report = result["status"]["message"]["parts"][0]["text"].as_str().unwrap();
    assert!(report.starts_with("**Contract Type:** NDA"));
    assert!(report.contains("**Ambiguous Terms:** None found"));
    assert!(report.contains("**Risk Clauses:** Unlimited liability"));

    let history = result["history"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["messageId"], "m-1");
    assert_eq!(history[1]["role"], "agent");
    assert_eq!(history[1]["taskId"], result["id"]);
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn task_style_params_keep_caller_ids() {
    let request = json!({
        "jsonrpc": "2.0",
        "id": 9,
        "method": "execute",
        "params": {
            "contextId": "ctx-1",
            "taskId": "task-1",
            "messages": [
                { "role": "user", "parts": [{ "kind": "text", "text": "old draft" }] },
                { "role": "user", "parts": [{ "kind": "text", "text": "Master services agreement..." }] }
            ]
        }
    });
    let (status, body) = post_json(
        app(StubBackend::replying("plain prose, not json")),
        "/a2a/clarity",
        &request,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let result = &body["result"];
    assert_eq!(result["id"], "task-1");
    assert_eq!(result["contextId"], "ctx-1");
    assert_eq!(result["artifacts"][0]["parts"][0]["text"], "Unknown");
    assert_eq!(result["history"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn mismatched_params_are_internal_error() {
    let (status, body) = post_json(
        app(StubBackend::replying(NDA_ANALYSIS)),
        "/a2a/clarity",
        &json!({ "jsonrpc": "2.0", "id": 3, "method": "message/send", "params": { "nope": true } }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["id"], 3);
    assert_eq!(body["error"]["code"], -32603);
}

#[tokio::test]
async fn provider_error_is_internal_error() {
    let backend =
        StubBackend::failing(|| Err(ClarityError::Provider("model_decommissioned".into())));
    let (status, body) = post_json(
        app(backend),
        "/a2a/clarity",
        &send_message(json!(5), "Employment agreement between..."),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], -32603);
    let details = body["error"]["data"]["details"].as_str().unwrap();
    assert!(details.contains("model_decommissioned"));
}

#[tokio::test]
async fn metadata_model_reaches_provider() {
    let backend = StubBackend::replying(NDA_ANALYSIS);
    let mut request = send_message(json!(11), "Software licence agreement...");
    request["params"]["metadata"] = json!({ "model": "llama-3.1-70b-specdec" });

    let (status, _) = post_json(app(backend.clone()), "/a2a/clarity", &request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(backend.last_model().as_deref(), Some("llama-3.1-70b-specdec"));

    let (status, _) = post_json(
        app(backend.clone()),
        "/a2a/clarity",
        &send_message(json!(12), "Software licence agreement..."),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(backend.last_model(), None);
}

#[tokio::test]
async fn task_style_message_metadata_selects_model() {
    let backend = StubBackend::replying(NDA_ANALYSIS);
    let request = json!({
        "jsonrpc": "2.0",
        "id": 13,
        "method": "execute",
        "params": {
            "messages": [{
                "role": "user",
                "parts": [{ "kind": "text", "text": "Consulting agreement..." }],
                "metadata": { "model": "mixtral-8x7b" }
            }]
        }
    });

    let (status, _) = post_json(app(backend.clone()), "/a2a/clarity", &request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(backend.last_model().as_deref(), Some("mixtral-8x7b"));
}
