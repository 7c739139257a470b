//! Render prompt tool definition.
//!
//! Looks a prompt up by id, name or title and renders its template with the
//! supplied variables.

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

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the render prompt tool.
#[derive(Debug, Clone, JsonSchema)]
pub struct RenderPromptParams {
    /// The prompt identifier (its id, name or title).
    pub id: String,

    /// Variables to substitute in the prompt template.
    pub variables: Option<JsonObject>,
}

impl RenderPromptParams {
    /// Validate raw tool arguments.
    pub fn from_arguments(arguments: Option<&JsonObject>) -> Result<Self, PromptError> {
        let arguments = arguments
            .ok_or_else(|| PromptError::invalid_argument("args", "Arguments must be an object"))?;

        let id = match arguments.get("id") {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            _ => {
                return Err(PromptError::invalid_argument(
                    "id",
                    "ID is required and must be a string",
                ));
            }
        };

        // Falsy values mean "no variables"; an array carries no named ones.
        let variables = match arguments.get("variables") {
            Some(Value::Object(variables)) => Some(variables.clone()),
            None | Some(Value::Array(_)) => None,
            Some(value) if is_falsy(value) => None,
            Some(_) => {
                return Err(PromptError::invalid_argument(
                    "variables",
                    "Variables must be an object",
                ));
            }
        };

        Ok(Self { id, variables })
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Render prompt tool - renders a stored template with variables.
pub struct RenderPromptTool;

impl RenderPromptTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "renderPrompt";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Render a prompt template with variables";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(id = %params.id))]
    pub async fn execute(
        params: &RenderPromptParams,
        service: &PromptService,
    ) -> Result<CallToolResult, PromptError> {
        info!("Render prompt tool called for: {}", params.id);

        let text = service
            .render_prompt(&params.id, params.variables.as_ref())
            .await?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<RenderPromptParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute backed by the given prompt service.
    pub fn create_route<S>(service: Arc<PromptService>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let arguments = ctx.arguments.clone();
            let service = service.clone();
            async move {
                let result = match RenderPromptParams::from_arguments(arguments.as_ref()) {
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

// ============================================================================
// Tests
// ============================================================================
