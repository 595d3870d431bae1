/// Wire types for the A2A-style contract endpoint
///
/// Messages, parts and task results, plus the JSON-RPC 2.0 envelope that carries them.
pub mod message;
pub mod rpc;
pub mod task;

pub use message::{Message, MessageConfiguration, MessagePart};
pub use rpc::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, MessageSendParams, TaskParams,
    INTERNAL_ERROR, INVALID_REQUEST, JSONRPC_VERSION, METHOD_MESSAGE_SEND, PARSE_ERROR,
};
pub use task::{Artifact, TaskResult, TaskState, TaskStatus};

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
