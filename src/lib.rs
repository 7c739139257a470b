//! Prompt MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server that serves
//! prompt templates stored as JSON files on disk.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling, and the main server
//! - **domains**: Business logic organized by bounded contexts
//!   - **prompts**: Loading, lookup, rendering and search of prompt templates
//!   - **resources**: Prompt records exposed as readable `prompt:///` resources
//!   - **tools**: The `renderPrompt` and `searchPrompts` tools
//!
//! # Example
//!
//! ```rust,no_run
//! use prompt_mcp_server::{core::Config, core::McpServer, core::StdioTransport};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     config.validate()?;
//!     let server = McpServer::new(config);
//!     StdioTransport::run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
