//! Perplexity Search MCP Server
//!
//! Web search via the Perplexity API, exposed over MCP stdio.
//!
//! # Configuration
//! Set `PERPLEXITY_API_KEY` (required) and optionally `PERPLEXITY_MODEL`, or
//! configure in `~/.binks/perplexity.toml`

use clap::Parser;
use rmcp::{transport::stdio, ServiceExt};
use std::path::PathBuf;

use perplexity_mcp::config::Config;
use perplexity_mcp::PerplexityMcpServer;

#[derive(Parser)]
#[command(name = "perplexity-mcp")]
#[command(about = "Perplexity web search MCP server", version)]
struct Cli {
    /// Path to a TOML config file (default: ~/.binks/perplexity.toml)
    #[arg(long, env = "PERPLEXITY_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Default model, overriding PERPLEXITY_MODEL and the config file
    #[arg(short = 'm', long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    mcp_common::init_tracing("perplexity_mcp")?;

    tracing::info!("Starting Perplexity MCP Server");

    let mut config = Config::load(cli.config)?;
    if let Some(model) = cli.model {
        config.search.default_model = model;
    }
    let default_model = config.validate()?;

    let server = PerplexityMcpServer::new(&config.api, default_model)?;
    let service = server.serve(stdio()).await?;

    tracing::info!(
        "Server running on stdio (default model: {}), auto-selection enabled",
        default_model
    );

    let cancel = service.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, closing session");
            cancel.cancel();
        }
    });

    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
