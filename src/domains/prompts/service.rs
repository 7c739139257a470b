//! Prompt service implementation.
//!
//! The PromptService answers the prompt-facing operations (list, get, render,
//! search) on top of a [`PromptSource`]. It holds no records itself; every
//! call goes back to the source.

use rmcp::model::{GetPromptResult, JsonObject, Prompt, PromptMessage, PromptMessageRole};
use std::sync::Arc;
use tracing::{debug, info};

use super::error::PromptError;
use super::search::{SearchOutcome, search};
use super::store::{FilePromptStore, PromptSource};
use super::templates::TemplateRenderer;
use crate::core::config::PromptsConfig;

/// Service for listing, rendering and searching prompts.
pub struct PromptService {
    source: Arc<dyn PromptSource>,
    renderer: TemplateRenderer,
}

impl PromptService {
    /// Create a PromptService reading from the configured prompts directory.
    pub fn new(config: &PromptsConfig) -> Self {
        info!(
            "Initializing PromptService with directory {}",
            config.directory.display()
        );
        Self::with_source(Arc::new(FilePromptStore::new(&config.directory)))
    }

    /// Create a PromptService over an arbitrary source.
    pub fn with_source(source: Arc<dyn PromptSource>) -> Self {
        Self {
            source,
            renderer: TemplateRenderer::new(),
        }
    }

    /// The underlying prompt source.
    pub fn source(&self) -> Arc<dyn PromptSource> {
        self.source.clone()
    }

    /// Render the prompt identified by `id` with optional variables.
    pub async fn render_prompt(
        &self,
        id: &str,
        variables: Option<&JsonObject>,
    ) -> Result<String, PromptError> {
        let record = self.source.find_by_id(id).await?;
        let rendered = self.renderer.render(id, record.body(), variables)?;
        debug!("Successfully rendered prompt: {}", id);
        Ok(rendered)
    }

    /// Search prompts by name or description.
    pub async fn search_prompts(&self, query: &str) -> Result<SearchOutcome, PromptError> {
        let records = self.source.load_all().await?;
        let outcome = search(query, records);

        match &outcome {
            SearchOutcome::Summary(summary) => debug!(
                "Empty query - returning summary of {} prompts",
                summary.total_prompts
            ),
            SearchOutcome::Matches(found) => debug!(
                "Search found {} results for query: {}",
                found.len(),
                query
            ),
        }
        Ok(outcome)
    }

    /// List all prompts for slash-command style use.
    pub async fn list_prompts(&self) -> Result<Vec<Prompt>, PromptError> {
        let records = self.source.load_all().await?;

        Ok(records
            .iter()
            .map(|record| Prompt {
                name: record.identifier().to_string(),
                title: Some(record.display_name().to_string()),
                description: record.description().map(str::to_string),
                arguments: Some(record.arguments()),
                icons: None,
                meta: None,
            })
            .collect())
    }

    /// Render a prompt as a single user message.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<GetPromptResult, PromptError> {
        let record = self.source.find_by_id(name).await?;
        let content = self
            .renderer
            .render(name, record.body(), arguments.as_ref())?;

        Ok(GetPromptResult {
            description: record.description().map(str::to_string),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, content)],
        })
    }
}
