//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the domain services. Prompt errors cross the
//! protocol boundary as `ErrorData` carrying the flat error record.
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool
//! and wired in `domains/tools/router.rs`.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::config::Config;
use crate::domains::{
    prompts::{PromptError, PromptService},
    resources::ResourceService,
    tools::build_tool_router,
};

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and coordinates
/// between the prompt and resource services, which share one prompt source.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Service for handling prompt-related requests.
    prompt_service: Arc<PromptService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);

        let prompt_service = Arc::new(PromptService::new(&config.prompts));
        let resource_service = Arc::new(ResourceService::new(prompt_service.source()));

        Self {
            tool_router: build_tool_router::<Self>(prompt_service.clone()),
            config,
            resource_service,
            prompt_service,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the prompt service.
    pub fn prompt_service(&self) -> &Arc<PromptService> {
        &self.prompt_service
    }

    /// Count the prompts currently loadable from the store.
    pub async fn prompt_count(&self) -> super::Result<usize> {
        let records = self.prompt_service.source().load_all().await?;
        Ok(records.len())
    }
}

/// Log a failed request and convert it for the protocol layer.
fn to_mcp_error(operation: &str, err: PromptError) -> McpError {
    warn!(error = ?err.to_record(), "{} failed", operation);
    McpError::from(err)
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Prompt template server. Use searchPrompts to discover templates and \
                 renderPrompt to fill them in. Templates are also available as prompts \
                 and as prompt:/// resources."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        debug!("Listing resources");
        let resources = self
            .resource_service
            .list_resources()
            .await
            .map_err(|e| to_mcp_error("list_resources", e))?;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        debug!("Listing resource templates");
        let templates = self.resource_service.list_resource_templates().await;
        Ok(ListResourceTemplatesResult {
            resource_templates: templates,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        debug!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| to_mcp_error("read_resource", e))
    }

    #[instrument(skip(self, _context))]
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        debug!("Listing prompts");
        let prompts = self
            .prompt_service
            .list_prompts()
            .await
            .map_err(|e| to_mcp_error("list_prompts", e))?;
        Ok(ListPromptsResult {
            prompts,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        info!("Getting prompt: {}", request.name);
        self.prompt_service
            .get_prompt(&request.name, request.arguments)
            .await
            .map_err(|e| to_mcp_error("get_prompt", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PromptsConfig;
    use std::fs;
    use tempfile::TempDir;

    fn server_in(dir: &TempDir) -> McpServer {
        let config = Config {
            prompts: PromptsConfig {
                directory: dir.path().to_path_buf(),
            },
            ..Config::default()
        };
        McpServer::new(config)
    }

    #[test]
    fn test_server_info_capabilities() {
        let temp_dir = TempDir::new().unwrap();
        let info = server_in(&temp_dir).get_info();

        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.capabilities.prompts.is_some());
    }

    #[tokio::test]
    async fn test_prompt_count() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("a.json"),
            r#"[{"id":"a","prompt":"A"},{"id":"b","prompt":"B"}]"#,
        )
        .unwrap();

        let server = server_in(&temp_dir);
        assert_eq!(server.name(), "mcp-generic-prompt");
        assert_eq!(server.prompt_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_prompt_count_reports_store_errors() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("bad.json"), "not json").unwrap();

        let err = server_in(&temp_dir).prompt_count().await.unwrap_err();
        assert!(matches!(
            err,
            crate::core::Error::Prompt(PromptError::Format { .. })
        ));
    }
}
