//! Wire types for the Perplexity chat completions API
//!
//! See: https://docs.perplexity.ai/api-reference/chat-completions

use serde::{Deserialize, Serialize};

use crate::models::ModelId;

/// System prompt sent ahead of every user query
pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that searches the web for accurate information.";

/// A single chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Body of `POST /chat/completions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub model: ModelId,
    pub messages: Vec<ChatMessage>,
    /// Domains to restrict to; blocked domains carry a leading `-`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub search_domain_filter: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_recency_filter: Option<String>,
}

impl ChatRequest {
    /// Build a search request for `query` with the standard system prompt
    pub fn search(model: ModelId, query: &str) -> Self {
        Self {
            model,
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(query)],
            search_domain_filter: Vec::new(),
            search_recency_filter: None,
        }
    }
}

/// Successful completion response (only the fields we read)
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: String,
}

impl ChatResponse {
    /// Content of the first choice, if any
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}
