//! JSON-RPC 2.0 message helpers for the MCP stdio transport.
//!
//! Messages are framed one per line.

use agent_sdk::{ToolSpec, TransportError};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

/// Protocol revision sent in `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Method names used by the client.
pub mod methods {
    /// Handshake request.
    pub const INITIALIZE: &str = "initialize";
    /// Handshake completion notification.
    pub const INITIALIZED: &str = "notifications/initialized";
    /// Tool discovery.
    pub const TOOLS_LIST: &str = "tools/list";
    /// Tool execution.
    pub const TOOLS_CALL: &str = "tools/call";
    /// Liveness check either side may send.
    pub const PING: &str = "ping";
}

/// JSON-RPC error code for an unsupported method.
pub const METHOD_NOT_FOUND: i64 = -32601;

/// Builds a request envelope.
#[must_use]
pub fn request(id: u64, method: &str, params: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params,
    })
}

/// Builds a notification envelope (no id, no response expected).
#[must_use]
pub fn notification(method: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "method": method,
    })
}

/// Builds a successful response to a server-initiated request.
#[must_use]
pub fn response(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result,
    })
}

/// Builds an error response to a server-initiated request.
#[must_use]
pub fn error_response(id: Value, code: i64, message: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {"code": code, "message": message},
    })
}

/// Answer to a server-initiated request: an empty result for `ping`,
/// method-not-found for anything else.
#[must_use]
pub fn reply_to(id: Value, method: &str) -> Value {
    if method == methods::PING {
        response(id, json!({}))
    } else {
        error_response(id, METHOD_NOT_FOUND, &format!("Method not found: {method}"))
    }
}

/// Parameters of the `initialize` request.
#[must_use]
pub fn initialize_params(client_name: &str, client_version: &str) -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {},
        "clientInfo": {
            "name": client_name,
            "version": client_version,
        },
    })
}

/// Serializes a message as one line, newline included.
///
/// # Errors
///
/// Returns a protocol error if the value cannot be serialized.
pub fn encode_line(message: &Value) -> Result<Vec<u8>, TransportError> {
    let mut line = serde_json::to_vec(message)
        .map_err(|e| TransportError::Protocol(format!("failed to encode message: {e}")))?;
    line.push(b'\n');
    Ok(line)
}

/// What an incoming line turned out to be, relative to a pending request.
#[derive(Debug)]
pub enum Incoming {
    /// The response to the pending request.
    Response(Value),
    /// A server-initiated request that expects an answer.
    Request {
        /// Id to answer with.
        id: Value,
        /// Requested method.
        method: String,
    },
    /// A notification.
    Notification(String),
    /// A response to some other request id.
    Unrelated,
}

/// Classifies an incoming message against the pending request id.
#[must_use]
pub fn classify(message: Value, pending_id: u64) -> Incoming {
    if matches_request(&message, pending_id) {
        return Incoming::Response(message);
    }
    let Some(method) = message.get("method").and_then(Value::as_str) else {
        return Incoming::Unrelated;
    };
    match message.get("id") {
        Some(id) if !id.is_null() => Incoming::Request {
            id: id.clone(),
            method: method.to_string(),
        },
        _ => Incoming::Notification(method.to_string()),
    }
}

/// Whether `message` answers the request with `id`. Ids may come back as numbers or strings.
#[must_use]
pub fn matches_request(message: &Value, id: u64) -> bool {
    if message.get("method").is_some() {
        return false;
    }
    match message.get("id") {
        Some(Value::Number(n)) => n.as_u64() == Some(id),
        Some(Value::String(s)) => s.parse::<u64>().ok() == Some(id),
        _ => false,
    }
}

/// Extracts `result` from a response, turning an `error` object into a transport error.
///
/// # Errors
///
/// Returns [`TransportError::Remote`] for error responses and a protocol
/// error when neither field is present.
pub fn extract_result(mut message: Value) -> Result<Value, TransportError> {
    if let Some(error) = message.get("error") {
        let code = error.get("code").and_then(Value::as_i64).unwrap_or_default();
        let text = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(TransportError::Remote {
            code,
            message: text,
        });
    }
    message
        .get_mut("result")
        .map(Value::take)
        .ok_or_else(|| TransportError::Protocol("response carries neither result nor error".into()))
}

#[derive(Deserialize)]
struct ToolsListResult {
    #[serde(default)]
    tools: Vec<Value>,
}

/// Decodes the `tools/list` result.
///
/// Entries are decoded one by one. An entry that is not a tool object becomes
/// an unnamed spec, which the catalog lists as a placeholder.
///
/// # Errors
///
/// Returns a protocol error if the result carries no `tools` array.
pub fn decode_tools(result: Value) -> Result<Vec<ToolSpec>, TransportError> {
    let list = serde_json::from_value::<ToolsListResult>(result)
        .map_err(|e| TransportError::Protocol(format!("invalid tools/list result: {e}")))?;
    Ok(list
        .tools
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            serde_json::from_value(entry).unwrap_or_else(|e| {
                warn!(position = i + 1, error = %e, "Undecodable tool entry");
                ToolSpec::default()
            })
        })
        .collect())
}
