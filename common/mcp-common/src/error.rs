//! Error helpers for MCP servers
//!
//! Protocol-level faults (bad arguments, unknown tools) are returned as
//! `rmcp::ErrorData`.
//! Failures of whatever the tool talks to belong in a result instead; see
//! [`crate::text_error`].

use rmcp::{model::ErrorCode, ErrorData as McpError};

/// Create an invalid params error with a message
///
/// Use this when a tool receives arguments that parse but are unusable,
/// such as an empty query string.
pub fn invalid_params(message: impl Into<String>) -> McpError {
    McpError::invalid_params(message.into(), None)
}

/// Create a method-not-found error for a tool name the server does not expose
///
/// rmcp's tool router reports a miss as invalid params; servers that need
/// clients to tell the two apart check the route first and return this.
pub fn tool_not_found(name: &str) -> McpError {
    McpError::new(ErrorCode::METHOD_NOT_FOUND, format!("Unknown tool: {name}"), None)
}
