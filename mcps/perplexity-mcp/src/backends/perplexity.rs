//! Perplexity backend
//!
//! Implements the SearchBackend trait against the Perplexity chat completions
//! endpoint. See: https://docs.perplexity.ai/api-reference/chat-completions

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use super::{ApiError, SearchBackend};
use crate::config::ApiConfig;
use crate::types::{ChatRequest, ChatResponse};

/// Perplexity backend
pub struct PerplexityBackend {
    client: Client,
    base_url: String,
    api_key: String,
}

impl PerplexityBackend {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.key.clone(),
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// Pick the most specific message out of an error response body
///
/// Prefers `error.message`, then `detail`, then a generic status line.
pub fn extract_error_message(status: u16, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    let from_body = parsed.as_ref().and_then(|value| {
        value
            .pointer("/error/message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .or_else(|| match value.get("detail") {
                Some(Value::String(detail)) if !detail.is_empty() => Some(detail.clone()),
                Some(Value::Null) | None => None,
                Some(Value::String(_)) => None,
                Some(other) => Some(other.to_string()),
            })
    });

    from_body.unwrap_or_else(|| format!("Request failed with status code {status}"))
}

#[async_trait]
impl SearchBackend for PerplexityBackend {
    fn name(&self) -> &str {
        "perplexity"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<String, ApiError> {
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), body = %text, "Perplexity API request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: extract_error_message(status.as_u16(), &text),
            });
        }

        let completion: ChatResponse = serde_json::from_str(&text)?;
        completion
            .first_content()
            .map(str::to_string)
            .ok_or(ApiError::NoContent)
    }
}
