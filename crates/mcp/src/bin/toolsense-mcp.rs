// Standalone MCP server binary

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use toolsense_core::ToolCatalog;
use toolsense_mcp::config::ServerConfig;
use toolsense_mcp::protocol::ServerInfo;
use toolsense_mcp::server::McpServer;
use toolsense_mcp::tools::*;

#[derive(Parser, Debug)]
#[command(name = "toolsense-mcp")]
#[command(about = "Tool catalog and thought-based tool recommendations over MCP", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "TOOLSENSE_CONFIG", default_value = "toolsense.toml")]
    config: PathBuf,

    /// Print the enabled catalog as an MCP tools/list result and exit
    #[arg(long)]
    print_catalog: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toolsense=info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    tracing::info!("Toolsense MCP Server starting...");
    tracing::info!("Configuration: {}", args.config.display());

    let config = ServerConfig::load(&args.config)?;
    let catalog = ToolCatalog::builtin();
    let available = Arc::new(config.availability(catalog));

    tracing::info!("{} of {} catalog tools enabled", available.len(), catalog.len());

    if args.print_catalog {
        let listing = enabled_listing(catalog, &available);
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    // Create tool registry
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(RecommendToolsTool::new(available.clone())));
    registry.register(Arc::new(ListCatalogTool::new(available)));

    tracing::info!("Registered {} tools", registry.len());

    // Start MCP server
    let server = McpServer::new(
        registry,
        ServerInfo {
            name: config.name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    );
    server.start().await?;

    Ok(())
}
