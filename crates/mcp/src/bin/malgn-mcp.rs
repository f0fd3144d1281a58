// Standalone MCP server binary (newline-delimited JSON-RPC over stdio)

use anyhow::{Context, Result};
use malgn_mcp::server::{McpServer, McpSettings};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "malgn=info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::info!("Malgn MCP Server starting...");

    let mut settings = McpSettings::default();
    if let Ok(policy) = std::env::var("MALGN_UNKNOWN_PARAMS") {
        settings.unknown_params = policy
            .parse()
            .context("Invalid MALGN_UNKNOWN_PARAMS")?;
    }
    if let Ok(version) = std::env::var("MALGN_PROTOCOL_VERSION") {
        settings.protocol_version = version;
    }

    let server = McpServer::builtin(settings)?;
    server.serve_stdio().await?;

    Ok(())
}
