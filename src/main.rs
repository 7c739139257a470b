//! MCP Server Entry Point
//!
//! Initializes logging, loads configuration, and serves prompts over stdio.

use anyhow::Result;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use prompt_mcp_server::core::{Config, McpServer, StdioTransport, config::LoggingConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging);

    info!("Starting {} v{}", config.server.name, config.server.version);
    info!("Serving prompts from {}", config.prompts.directory.display());

    config.validate()?;

    let server = McpServer::new(config);

    // The store is re-read on every request, so a broken file is not fatal here.
    match server.prompt_count().await {
        Ok(count) => info!("{} prompt templates available", count),
        Err(e) => warn!("Prompt store currently fails to load: {}", e),
    }

    StdioTransport::run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout carries the protocol.
fn init_logging(logging: &LoggingConfig) {
    let level = match logging.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if logging.with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
