//! Search backend implementations
//!
//! The server talks to the completion API through the [`SearchBackend`]
//! trait so tests can swap in a stub. Perplexity is the only real backend.

use async_trait::async_trait;

use crate::types::ChatRequest;

pub mod perplexity;

/// Failure talking to the upstream search API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx response; `message` is the most specific text found in the body
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never produced a response
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response whose body could not be parsed
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A 2xx response with no choices
    #[error("No response content received")]
    NoContent,
}

/// Trait for chat-completion search backends
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Get the name of this backend
    fn name(&self) -> &str;

    /// Send a completion request and return the text of the first choice
    ///
    /// A response without choices is reported as [`ApiError::NoContent`].
    async fn complete(&self, request: &ChatRequest) -> Result<String, ApiError>;
}
