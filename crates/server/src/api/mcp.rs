// MCP over HTTP: one JSON-RPC payload per POST

use crate::config::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use malgn_mcp::protocol::{JsonRpcError, JsonRpcResponse};
use serde_json::Value;
use std::sync::Arc;

/// POST /mcp
///
/// Content type and JSON syntax are checked here; the protocol engine only sees
/// well-formed payloads.
pub async fn handle_mcp(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !is_json(&headers) {
        return transport_error("Content-Type must be application/json");
    }

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::debug!("Rejected malformed MCP payload: {}", err);
            return transport_error("Parse error");
        }
    };

    match state.mcp.handle_payload(payload) {
        Some(reply) => Json(reply).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// GET and DELETE /mcp; no server-initiated streams or sessions
pub async fn method_not_allowed() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false)
}

fn transport_error(message: &str) -> Response {
    let response = JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error(message));
    (StatusCode::BAD_REQUEST, Json(response)).into_response()
}
