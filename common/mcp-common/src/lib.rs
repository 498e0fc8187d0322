//! MCP Common - Shared utilities for MCP servers
//!
//! - **Initialization**: [`init_tracing`] sets up stderr logging
//! - **Results**: helpers for text `CallToolResult` responses, including
//!   error-flagged results that keep the session alive
//! - **Errors**: constructors for protocol-level faults
//! - **Embeddable**: [`EmbeddableMcp`] trait for in-process execution
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{invalid_params, text_error, text_success};
//!
//! async fn lookup(&self, key: &str) -> Result<CallToolResult, McpError> {
//!     if key.is_empty() {
//!         return Err(invalid_params("key must not be empty"));
//!     }
//!     match self.upstream.get(key).await {
//!         Ok(value) => Ok(text_success(value)),
//!         Err(e) => Ok(text_error(format!("upstream error: {e}"))),
//!     }
//! }
//! ```

pub mod embeddable;
pub mod error;
pub mod init;
pub mod result;

// Re-export commonly used items at crate root
pub use embeddable::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use error::{invalid_params, tool_not_found};
pub use init::init_tracing;
pub use result::{text_error, text_success};

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Content, Tool},
    ErrorData as McpError,
};

// Re-export async_trait for implementing EmbeddableMcp
pub use async_trait::async_trait;
