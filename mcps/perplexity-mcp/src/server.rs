//! MCP Server implementation for Perplexity search
//!
//! Exposes the search tool plus the tools that tune the session: domain and
//! recency filters, and model selection.

use anyhow::Result;
use mcp_common::{
    async_trait, invalid_params, text_error, text_success, tool_not_found, EmbeddableError,
    EmbeddableMcp, EmbeddableResult, McpError,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::ToolCallContext, wrapper::Parameters},
    model::{
        CallToolRequestParam, CallToolResult, ListToolsResult, PaginatedRequestParam,
        ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    tool, tool_router, RoleServer,
};
use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::backends::{perplexity::PerplexityBackend, SearchBackend};
use crate::config::ApiConfig;
use crate::filters::{normalize_domain, DomainAction, RecencyChoice, RecencyWindow};
use crate::models::ModelId;
use crate::session::SearchSession;
use crate::types::ChatRequest;

const INSTRUCTIONS: &str = "Perplexity Search MCP Server - searches the web through the \
     Perplexity API. The model is chosen per query from its keywords unless one is pinned \
     with model_info. Domain and recency filters apply to every search until cleared.";

/// The main Perplexity MCP Server
#[derive(Clone)]
pub struct PerplexityMcpServer {
    backend: Arc<dyn SearchBackend>,
    session: Arc<Mutex<SearchSession>>,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Parameter Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchParams {
    #[schemars(description = "The search query")]
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DomainFilterParams {
    #[schemars(description = "Domain name without http:// or https:// (example: wikipedia.org)")]
    pub domain: String,

    #[schemars(description = "Whether to allow or block this domain")]
    pub action: DomainAction,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RecencyFilterParams {
    #[schemars(description = "Time window for search results (none to disable filtering)")]
    pub filter: RecencyChoice,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ModelInfoParams {
    #[schemars(description = "Optional: Set a specific model instead of using automatic selection")]
    #[serde(default)]
    pub model: Option<ModelId>,
}

// ============================================================================
// Tool Router Implementation
// ============================================================================

#[tool_router]
impl PerplexityMcpServer {
    pub fn new(api: &ApiConfig, default_model: ModelId) -> Result<Self> {
        tracing::info!("Using Perplexity backend at {}", api.base_url);
        let backend: Arc<dyn SearchBackend> = Arc::new(PerplexityBackend::new(api)?);
        Ok(Self::with_backend(backend, default_model))
    }

    /// Build a server around any backend (used by tests)
    pub fn with_backend(backend: Arc<dyn SearchBackend>, default_model: ModelId) -> Self {
        Self {
            backend,
            session: Arc::new(Mutex::new(SearchSession::new(default_model))),
            tool_router: Self::tool_router(),
        }
    }

    /// Snapshot of the session state
    pub async fn session(&self) -> SearchSession {
        self.session.lock().await.clone()
    }

    // ========================================================================
    // Search
    // ========================================================================

    #[tool(description = "Search the web using Perplexity AI")]
    async fn search(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        if params.query.trim().is_empty() {
            return Err(invalid_params(
                "Invalid search arguments. Query must be a non-empty string.",
            ));
        }

        let (request, resolved) = {
            let mut session = self.session.lock().await;
            let resolved = session.models.resolve(&params.query);

            let mut request = ChatRequest::search(resolved.model, &params.query);
            request.search_domain_filter = session.filters.domain_filter();
            request.search_recency_filter =
                session.filters.recency().map(|w| w.as_str().to_string());
            (request, resolved)
        };

        tracing::info!(
            model = %resolved.model,
            backend = self.backend.name(),
            "Searching for: {}",
            params.query
        );

        match self.backend.complete(&request).await {
            Ok(content) => Ok(text_success(format!(
                "[Using model: {} - {}]\n\n{}",
                resolved.model, resolved.description, content
            ))),
            Err(e) => {
                tracing::warn!("Search failed: {}", e);
                Ok(text_error(format!("Perplexity API error: {}", e)))
            }
        }
    }

    // ========================================================================
    // Filter Tools
    // ========================================================================

    #[tool(description = "Add a domain to allow or block in search results (max 3 domains per type)")]
    async fn domain_filter(
        &self,
        Parameters(params): Parameters<DomainFilterParams>,
    ) -> Result<CallToolResult, McpError> {
        let domain = normalize_domain(&params.domain);
        if domain.is_empty() {
            return Err(invalid_params(
                "Invalid domain filter arguments. Domain must be a non-empty string and action must be either 'allow' or 'block'.",
            ));
        }

        self.session
            .lock()
            .await
            .filters
            .apply_domain(&domain, params.action);

        tracing::debug!(domain = %domain, action = ?params.action, "Domain filter updated");

        let message = match params.action {
            DomainAction::Allow => format!(
                "Added {} to allowed domains. Search results will prioritize this domain.",
                domain
            ),
            DomainAction::Block => format!(
                "Added {} to blocked domains. Search results will exclude this domain.",
                domain
            ),
        };
        Ok(text_success(message))
    }

    #[tool(description = "Set the time recency for search results")]
    async fn recency_filter(
        &self,
        Parameters(params): Parameters<RecencyFilterParams>,
    ) -> Result<CallToolResult, McpError> {
        let window: Option<RecencyWindow> = params.filter.into();
        self.session.lock().await.filters.set_recency(window);

        let message = match window {
            Some(window) => format!(
                "Recency filter set to \"{}\". Searches will be limited to content from the last {}.",
                window,
                window.span()
            ),
            None => "Recency filter has been disabled. Searches will include results from any time period."
                .to_string(),
        };
        Ok(text_success(message))
    }

    #[tool(description = "Clear all domain filters")]
    async fn clear_filters(&self) -> Result<CallToolResult, McpError> {
        self.session.lock().await.filters.clear();
        Ok(text_success(
            "All domain and recency filters have been cleared. Searches will use default Perplexity sources.",
        ))
    }

    #[tool(description = "List all current domain filters")]
    async fn list_filters(&self) -> Result<CallToolResult, McpError> {
        let session = self.session.lock().await;
        Ok(text_success(session.filters.describe()))
    }

    // ========================================================================
    // Model Tools
    // ========================================================================

    #[tool(
        description = "Get information about available models and optionally set a specific model"
    )]
    async fn model_info(
        &self,
        Parameters(params): Parameters<ModelInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;

        match params.model {
            Some(model) => {
                tracing::info!(model = %model, "Pinning model, auto-selection disabled");
                session.models.pin(model);
            }
            None => {
                tracing::info!("Resetting to default model, auto-selection enabled");
                session.models.reset();
            }
        }

        Ok(text_success(session.model_report(params.model.is_some())))
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

// Unknown tool names must fail with METHOD_NOT_FOUND, so they are caught
// here; the router alone reports a miss as INVALID_PARAMS.
impl rmcp::ServerHandler for PerplexityMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        if !self.tool_router.has_route(&request.name) {
            tracing::warn!(tool = %request.name, "Unknown tool requested");
            return Err(tool_not_found(&request.name));
        }
        let tcc = ToolCallContext::new(self, request, context);
        self.tool_router.call(tcc).await
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            meta: None,
            next_cursor: None,
        })
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

fn parse_params<T: DeserializeOwned>(params: Value) -> EmbeddableResult<T> {
    // Tools without arguments may be called with `null`
    let params = if params.is_null() {
        Value::Object(Default::default())
    } else {
        params
    };
    serde_json::from_value(params).map_err(|e| EmbeddableError::InvalidParams(e.to_string()))
}

#[async_trait]
impl EmbeddableMcp for PerplexityMcpServer {
    fn server_name(&self) -> &str {
        "perplexity"
    }

    fn server_description(&self) -> Option<&str> {
        Some(INSTRUCTIONS)
    }

    fn server_version(&self) -> Option<&str> {
        Some(env!("CARGO_PKG_VERSION"))
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        match name {
            "search" => {
                let params: SearchParams = parse_params(params)?;
                self.search(Parameters(params)).await.map_err(Into::into)
            }

            "domain_filter" => {
                let params: DomainFilterParams = parse_params(params)?;
                self.domain_filter(Parameters(params)).await.map_err(Into::into)
            }

            "recency_filter" => {
                let params: RecencyFilterParams = parse_params(params)?;
                self.recency_filter(Parameters(params)).await.map_err(Into::into)
            }

            "clear_filters" => self.clear_filters().await.map_err(Into::into),

            "list_filters" => self.list_filters().await.map_err(Into::into),

            "model_info" => {
                let params: ModelInfoParams = parse_params(params)?;
                self.model_info(Parameters(params)).await.map_err(Into::into)
            }

            _ => Err(EmbeddableError::ToolNotFound(name.to_string())),
        }
    }
}
