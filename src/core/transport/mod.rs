//! Transport layer for the MCP server.
//!
//! The server speaks MCP over standard input/output through the rmcp SDK.
//! Message framing and dispatch are handled entirely by rmcp.

mod error;
pub mod stdio;

pub use error::{TransportError, TransportResult};
pub use stdio::StdioTransport;
