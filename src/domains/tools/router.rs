//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! Each tool knows how to create its own route; this module only wires them
//! to the shared prompt service.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{RenderPromptTool, SearchPromptsTool};
use crate::domains::prompts::PromptService;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(service: Arc<PromptService>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(RenderPromptTool::create_route(service.clone()))
        .with_route(SearchPromptsTool::create_route(service))
}

/// Names of all registered tools.
pub fn tool_names() -> Vec<&'static str> {
    vec![RenderPromptTool::NAME, SearchPromptsTool::NAME]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PromptsConfig;

    struct TestServer {}

    fn test_service() -> Arc<PromptService> {
        Arc::new(PromptService::new(&PromptsConfig::default()))
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_service());
        let tools = router.list_all();
        assert_eq!(tools.len(), 2);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"renderPrompt"));
        assert!(names.contains(&"searchPrompts"));
    }

    #[test]
    fn test_tool_names_match_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_service());
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        let names = tool_names();
        assert_eq!(names.len(), router_names.len());
        for name in names {
            assert!(router_names.contains(&name));
        }
    }
}
