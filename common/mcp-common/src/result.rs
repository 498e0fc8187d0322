//! Result helpers for MCP tool responses
//!
//! Tools report two kinds of outcome through `CallToolResult`: plain
//! success, and failures of an upstream dependency. The latter carry
//! `is_error: true` so the client sees the failure without the protocol
//! session being torn down.

use rmcp::model::{CallToolResult, Content};

/// Create a successful plain text response
///
/// ```rust,ignore
/// Ok(text_success("Filter cleared"))
/// ```
pub fn text_success(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Create a plain text response flagged as a tool error
///
/// Use for runtime failures (an upstream API rejected the call, returned
/// nothing usable, or was unreachable). Malformed arguments are protocol
/// faults instead; see [`crate::invalid_params`].
///
/// ```rust,ignore
/// Err(e) => Ok(text_error(format!("API error: {e}")))
/// ```
pub fn text_error(text: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(text.into())])
}
