//! Perplexity Search MCP Library
//!
//! Web search through the Perplexity API with per-query model selection and
//! session-wide domain/recency filters.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use perplexity_mcp::{config::Config, PerplexityMcpServer};
//!
//! let config = Config::load(None)?;
//! let default_model = config.validate()?;
//! let server = PerplexityMcpServer::new(&config.api, default_model)?;
//! // Use with in-memory transport or serve via stdio
//! ```
//!
//! # Configuration
//! Set `PERPLEXITY_API_KEY` (required) and optionally `PERPLEXITY_MODEL`, or
//! configure in `~/.binks/perplexity.toml`

pub mod backends;
pub mod config;
pub mod filters;
pub mod models;
pub mod server;
pub mod session;
pub mod types;

// Re-export main server type
pub use server::PerplexityMcpServer;

// Re-export parameter types for direct API usage
pub use server::{DomainFilterParams, ModelInfoParams, RecencyFilterParams, SearchParams};

pub use models::{select_model, ModelId};
