//! Protocol-level tests for perplexity-mcp
//!
//! These serve the server over an in-memory duplex pipe and talk to it with
//! an rmcp client, so tool dispatch goes through `ServerHandler` exactly as it
//! does over stdio.

use perplexity_mcp::config::ApiConfig;
use perplexity_mcp::{ModelId, PerplexityMcpServer};
use rmcp::model::{CallToolRequestParam, ErrorCode};
use rmcp::service::RunningService;
use rmcp::{RoleClient, ServiceError, ServiceExt};
use serde_json::{json, Map, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn connect(base_url: &str) -> anyhow::Result<RunningService<RoleClient, ()>> {
    let (server_transport, client_transport) = tokio::io::duplex(4096);

    let api = ApiConfig {
        base_url: base_url.to_string(),
        key: "pplx-protocol".to_string(),
        ..ApiConfig::default()
    };
    let server = PerplexityMcpServer::new(&api, ModelId::SonarPro)?;
    tokio::spawn(async move {
        server.serve(server_transport).await?.waiting().await?;
        anyhow::Ok(())
    });

    Ok(().serve(client_transport).await?)
}

fn request(name: &'static str, arguments: Option<Value>) -> CallToolRequestParam {
    CallToolRequestParam {
        name: name.into(),
        arguments: arguments.and_then(|v| v.as_object().cloned()),
        task: None,
    }
}

fn error_code(result: Result<rmcp::model::CallToolResult, ServiceError>) -> ErrorCode {
    match result {
        Err(ServiceError::McpError(err)) => err.code,
        other => panic!("expected an MCP error, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_tool_is_method_not_found() -> anyhow::Result<()> {
    let client = connect("http://127.0.0.1:1").await?;

    let result = client
        .call_tool(request("delete_everything", Some(json!({}))))
        .await;
    assert_eq!(error_code(result), ErrorCode::METHOD_NOT_FOUND);

    client.cancel().await?;
    Ok(())
}

#[tokio::test]
async fn bad_arguments_are_invalid_params() -> anyhow::Result<()> {
    let client = connect("http://127.0.0.1:1").await?;

    let result = client
        .call_tool(request("recency_filter", Some(json!({"filter": "decade"}))))
        .await;
    assert_eq!(error_code(result), ErrorCode::INVALID_PARAMS);

    let result = client
        .call_tool(request("search", Some(json!({"query": "  "}))))
        .await;
    assert_eq!(error_code(result), ErrorCode::INVALID_PARAMS);

    client.cancel().await?;
    Ok(())
}

#[tokio::test]
async fn tools_are_listed_and_callable() -> anyhow::Result<()> {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "over the wire"}}]
        })))
        .mount(&mock)
        .await;
    let client = connect(&mock.uri()).await?;

    let mut names: Vec<String> = client
        .list_all_tools()
        .await?
        .into_iter()
        .map(|tool| tool.name.to_string())
        .collect();
    names.sort_unstable();
    assert_eq!(
        names,
        [
            "clear_filters",
            "domain_filter",
            "list_filters",
            "model_info",
            "recency_filter",
            "search"
        ]
    );

    // Tools without parameters accept a call with no arguments at all
    let listing = client.call_tool(request("list_filters", None)).await?;
    assert_ne!(listing.is_error, Some(true));

    let info = client.call_tool(request("model_info", None)).await?;
    assert_ne!(info.is_error, Some(true));

    let mut args = Map::new();
    args.insert("query".to_string(), json!("latest rust release"));
    let result = client
        .call_tool(CallToolRequestParam {
            name: "search".into(),
            arguments: Some(args),
            task: None,
        })
        .await?;
    let text = result
        .content
        .first()
        .and_then(|content| content.raw.as_text())
        .map(|text| text.text.clone())
        .unwrap_or_default();
    assert!(text.starts_with("[Using model: sonar-pro - "));
    assert!(text.ends_with("over the wire"));

    client.cancel().await?;
    Ok(())
}
