//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (a `.env` file is honoured) on top of defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::error::{Error, Result};

/// Name of the prompts directory shipped with the server.
const PROMPTS_DIR_NAME: &str = "prompts";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Prompts domain configuration.
    pub prompts: PromptsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the prompts domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptsConfig {
    /// Root of the prompt file tree.
    pub directory: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            directory: default_prompts_dir(),
        }
    }
}

/// The `prompts/` directory next to the installed executable, or the one
/// packaged with the crate sources. Never relative to the working directory.
///
/// The source-tree fallback is fixed at build time and is usually gone after
/// `cargo install`; installed binaries need `MCP_PROMPTS_DIR` or a `prompts/`
/// directory beside the executable.
fn default_prompts_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(PROMPTS_DIR_NAME)))
        .filter(|dir| dir.is_dir())
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(PROMPTS_DIR_NAME))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "mcp-generic-prompt".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            prompts: PromptsConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Recognized variables: `MCP_SERVER_NAME`, `MCP_PROMPTS_DIR`,
    /// `MCP_LOG_LEVEL` (falls back to `LOG_LEVEL`) and `MCP_LOG_TIMESTAMPS`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(directory) = std::env::var("MCP_PROMPTS_DIR") {
            config.prompts.directory = PathBuf::from(directory);
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL").or_else(|_| std::env::var("LOG_LEVEL")) {
            config.logging.level = level;
        }

        if let Ok(timestamps) = std::env::var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = timestamps.parse().unwrap_or(true);
        }

        config
    }

    /// Check that the configuration can be served.
    pub fn validate(&self) -> Result<()> {
        if !self.prompts.directory.is_dir() {
            return Err(Error::config(format!(
                "prompts directory {} does not exist or is not a directory \
                 (set MCP_PROMPTS_DIR to the location of the prompt files)",
                self.prompts.directory.display()
            )));
        }
        Ok(())
    }
}
