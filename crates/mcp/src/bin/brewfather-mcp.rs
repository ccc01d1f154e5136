// Brewfather MCP server binary

use anyhow::Result;
use brewfather_core::{BrewfatherClient, Credentials};
use brewfather_mcp::server::McpServer;
use brewfather_mcp::tools::*;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the protocol stream.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::info!("Brewfather MCP server starting...");

    // Fail fast on missing credentials before serving anything.
    let credentials = Credentials::from_env()?;
    let client = Arc::new(BrewfatherClient::new(&credentials)?);

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(CalculateAbvTool));
    registry.register(Arc::new(GetBatchesTool::new(client.clone())));
    registry.register(Arc::new(GetBatchDetailsTool::new(client.clone())));
    registry.register(Arc::new(GetInventoryFermentablesTool::new(client)));

    tracing::info!("Registered {} tools", registry.len());

    let server = McpServer::new(registry);
    server.start().await?;

    Ok(())
}
