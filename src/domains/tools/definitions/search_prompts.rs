//! Search prompts tool definition.
//!
//! Searches prompts by name or description. An empty query returns a
//! summary of the store (count and categories) instead of a result list.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::domains::prompts::{PromptError, PromptService};

/// Parameters for the search prompts tool.
#[derive(Debug, Clone, JsonSchema)]
pub struct SearchPromptsParams {
    /// Search query.
    pub query: String,
}

impl SearchPromptsParams {
    /// Validate raw tool arguments.
    pub fn from_arguments(arguments: Option<&JsonObject>) -> Result<Self, PromptError> {
        let arguments = arguments
            .ok_or_else(|| PromptError::invalid_argument("args", "Arguments must be an object"))?;

        match arguments.get("query") {
            None | Some(Value::Null) => {
                Err(PromptError::invalid_argument("query", "Query is required"))
            }
            Some(Value::String(query)) => Ok(Self {
                query: query.clone(),
            }),
            Some(_) => Err(PromptError::invalid_argument(
                "query",
                "Query must be a string",
            )),
        }
    }
}

/// Search prompts tool.
pub struct SearchPromptsTool;

impl SearchPromptsTool {
    pub const NAME: &'static str = "searchPrompts";

    pub const DESCRIPTION: &'static str = "Search prompts by name or description";

    #[instrument(skip_all, fields(query = %params.query))]
    pub async fn execute(
        params: &SearchPromptsParams,
        service: &PromptService,
    ) -> Result<CallToolResult, PromptError> {
        info!("Search prompts tool called");

        let outcome = service.search_prompts(&params.query).await?;
        let text = outcome
            .to_json()
            .map_err(|e| PromptError::serialization("Failed to serialize search results", e))?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SearchPromptsParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn create_route<S>(service: Arc<PromptService>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let arguments = ctx.arguments.clone();
            let service = service.clone();
            async move {
                let result = match SearchPromptsParams::from_arguments(arguments.as_ref()) {
                    Ok(params) => Self::execute(&params, &service).await,
                    Err(e) => Err(e),
                };
                result.map_err(|e| {
                    warn!(error = ?e.to_record(), "Tool call failed: {}", Self::NAME);
                    McpError::from(e)
                })
            }
            .boxed()
        })
    }
}
