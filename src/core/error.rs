//! Error types and handling for the MCP server.
//!
//! This module defines the crate-level error type that wraps domain,
//! configuration and transport failures.

use thiserror::Error;

use super::transport::TransportError;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the prompts domain.
    #[error("Prompt error: {0}")]
    Prompt(#[from] crate::domains::prompts::PromptError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failures.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
