use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{error, info, warn};

use clarity_core::protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, TaskResult, METHOD_MESSAGE_SEND,
};
use clarity_core::Result;

use crate::AppState;

fn rpc_reply(status: StatusCode, body: JsonRpcResponse) -> Response {
    (status, Json(body)).into_response()
}

/// JSON-RPC entry point for contract analysis
pub async fn contract_rpc_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let value: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            warn!(target: "http", error = %e, "Unparseable JSON-RPC body");
            return rpc_reply(
                StatusCode::BAD_REQUEST,
                JsonRpcResponse::failure(None, JsonRpcError::parse_error(e.to_string())),
            );
        }
    };

    let id = match JsonRpcRequest::validate(&value) {
        Ok(id) => id,
        Err(err) => {
            warn!(target: "http", jsonrpc = ?value.get("jsonrpc"), "Rejected JSON-RPC envelope");
            return rpc_reply(
                StatusCode::BAD_REQUEST,
                JsonRpcResponse::failure(JsonRpcRequest::raw_id(&value), err),
            );
        }
    };

    // jsonrpc and id are sound from here on; any other shape problem is internal
    let outcome = match serde_json::from_value::<JsonRpcRequest>(value) {
        Ok(request) => {
            info!(target: "http", method = %request.method, id = %id, "JSON-RPC request");
            dispatch(&state, &request).await.and_then(|task| {
                JsonRpcResponse::success(id.clone(), &task).map_err(Into::into)
            })
        }
        Err(e) => Err(e.into()),
    };
    match outcome {
        Ok(resp) => rpc_reply(StatusCode::OK, resp),
        Err(e) => {
            error!(target: "http", id = %id, error = %e, "Contract analysis failed");
            rpc_reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                JsonRpcResponse::failure(Some(id), JsonRpcError::internal(e.to_string())),
            )
        }
    }
}

async fn dispatch(state: &AppState, request: &JsonRpcRequest) -> Result<TaskResult> {
    if request.method == METHOD_MESSAGE_SEND {
        let params = request.message_send_params()?;
        if let Some(config) = &params.configuration {
            info!(
                target: "http",
                blocking = config.blocking,
                history_length = ?config.history_length,
                modes = ?config.accepted_output_modes,
                "message/send configuration"
            );
        }
        let model = params.requested_model();
        state
            .analyzer
            .analyze_with_model(vec![params.message], None, None, model)
            .await
    } else {
        let params = request.task_params()?;
        let model = params.requested_model();
        state
            .analyzer
            .analyze_with_model(params.messages, params.context_id, params.task_id, model)
            .await
    }
}
