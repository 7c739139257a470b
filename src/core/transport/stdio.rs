//! STDIO transport implementation.
//!
//! The server reads requests from stdin and writes responses to stdout, so
//! logs must go to stderr while this transport is active.

use rmcp::ServiceExt;
use tracing::{debug, info, warn};

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Serve `server` over stdin/stdout until the client disconnects or the
    /// process receives Ctrl-C.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        let name = server.name().to_string();
        info!("{} ready - communicating via stdin/stdout", name);

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        let token = service.cancellation_token();
        let interrupt = tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Interrupt received, closing session");
                    token.cancel();
                }
                Err(e) => warn!("Unable to listen for interrupt: {}", e),
            }
        });

        let reason = service.waiting().await;
        interrupt.abort();

        let reason = reason.map_err(|e| TransportError::service(e.to_string()))?;
        debug!(?reason, "Session closed");

        info!("{} stdio session finished", name);
        Ok(())
    }
}
