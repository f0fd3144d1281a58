// MCP (Model Context Protocol) server exposing Malgn framework knowledge
// to agent clients over JSON-RPC 2.0

pub mod error;
pub mod format;
pub mod protocol;
pub mod server;
pub mod tools;

pub use error::ToolCallError;
pub use protocol::Reply;
pub use server::{McpServer, McpSettings, UnknownParamPolicy};
