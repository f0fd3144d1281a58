use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod api;
mod config;

use config::ServerConfig;

#[derive(Parser, Debug)]
#[command(name = "malgn")]
#[command(about = "Malgn framework knowledge server (MCP over HTTP and REST)", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "MALGN_CONFIG", default_value = "malgn.toml")]
    config: PathBuf,

    /// Port to listen on (overrides the config file)
    #[arg(short, long, env = "MALGN_PORT")]
    port: Option<u16>,

    /// Host to bind to (overrides the config file)
    #[arg(long, env = "MALGN_HOST")]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "malgn=info,tower_http=debug".into()),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let args = Args::parse();

    tracing::info!("Starting Malgn knowledge server");

    // Load configuration
    let mut config = ServerConfig::load(&args.config)?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!(
        unknown_params = %config.mcp.unknown_params,
        "MCP protocol version {}",
        config.mcp.protocol_version
    );

    api::serve(config).await?;

    Ok(())
}
