//! Embeddable MCP trait for in-process execution
//!
//! [`EmbeddableMcp`] lets a host call a server's tools directly, without
//! spawning it as a subprocess and speaking the protocol over stdio.
//!
//! ```rust,ignore
//! use mcp_common::EmbeddableMcp;
//!
//! let tools = server.list_tools();
//! let result = server
//!     .call_tool("search", serde_json::json!({ "query": "rust 2024 edition" }))
//!     .await?;
//! ```

use async_trait::async_trait;
use rmcp::model::{CallToolResult, ErrorCode, Tool};
use serde_json::Value;

/// Error type for embeddable MCP operations
///
/// These mirror the protocol faults a stdio client would see. Tool-level
/// failures still arrive as `Ok(CallToolResult)` with `is_error` set.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddableError {
    /// Tool was not found in the server
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// Arguments were missing, mistyped, or rejected by the tool
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Any other MCP protocol error
    #[error("mcp error: {0}")]
    McpError(String),
}

impl From<rmcp::ErrorData> for EmbeddableError {
    fn from(err: rmcp::ErrorData) -> Self {
        if err.code == ErrorCode::INVALID_PARAMS {
            EmbeddableError::InvalidParams(err.message.to_string())
        } else {
            EmbeddableError::McpError(err.message.to_string())
        }
    }
}

/// Result type for embeddable MCP operations
pub type EmbeddableResult<T> = Result<T, EmbeddableError>;

/// Trait for MCP servers that can be executed in-process
///
/// Servers built on rmcp's `#[tool_router]` implement this by returning
/// `self.tool_router.list_all()` from [`list_tools`](Self::list_tools) and
/// matching on the tool name in [`call_tool`](Self::call_tool).
#[async_trait]
pub trait EmbeddableMcp: Send + Sync {
    /// Server name, matching the name used in MCP configuration files
    fn server_name(&self) -> &str;

    /// All tools with their descriptions and input schemas
    fn list_tools(&self) -> Vec<Tool>;

    /// Execute a tool by name with a JSON object of arguments
    ///
    /// Unknown names yield [`EmbeddableError::ToolNotFound`]; arguments that
    /// fail to deserialize or validate yield
    /// [`EmbeddableError::InvalidParams`].
    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult>;

    fn server_description(&self) -> Option<&str> {
        None
    }

    fn server_version(&self) -> Option<&str> {
        None
    }
}
