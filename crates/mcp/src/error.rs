// Failure taxonomy for tools/call

use serde_json::json;

use crate::protocol::{JsonRpcError, INTERNAL_ERROR, INVALID_PARAMS};

/// Why a tools/call request could not produce a result
///
/// Domain lookups that find nothing are not errors; they return a payload
/// carrying an `error` field instead.
#[derive(Debug, thiserror::Error)]
pub enum ToolCallError {
    #[error("tool name is required")]
    MissingName,

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error(
        "unknown parameter(s) for {tool}: {}. Valid parameters: {}",
        unknown.join(", "),
        valid.join(", ")
    )]
    UnknownParameters {
        tool: String,
        unknown: Vec<String>,
        valid: Vec<String>,
    },

    #[error("invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    #[error("{0}")]
    Internal(String),
}

impl ToolCallError {
    pub fn code(&self) -> i32 {
        match self {
            ToolCallError::Internal(_) => INTERNAL_ERROR,
            _ => INVALID_PARAMS,
        }
    }

    pub fn to_rpc_error(&self) -> JsonRpcError {
        let error = JsonRpcError::custom(self.code(), self.to_string());
        match self {
            ToolCallError::UnknownParameters { unknown, valid, .. } => error.with_data(json!({
                "unknown": unknown,
                "valid": valid,
            })),
            _ => error,
        }
    }
}
