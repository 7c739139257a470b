//! Resource service implementation.
//!
//! Every prompt record is exposed as a JSON resource at
//! `prompt:///<identifier>`. The listing is rebuilt from the prompt source on
//! each request.

use rmcp::model::{
    AnnotateAble, RawResource, RawResourceTemplate, ReadResourceResult, Resource,
    ResourceContents, ResourceTemplate,
};
use std::sync::Arc;
use tracing::debug;

use crate::domains::prompts::{FieldError, PromptError, PromptRecord, PromptSource};

/// URI prefix of prompt resources.
pub const PROMPT_URI_PREFIX: &str = "prompt:///";

/// MIME type of prompt resource content.
pub const PROMPT_MIME_TYPE: &str = "application/json";

/// Service exposing prompt records as resources.
pub struct ResourceService {
    source: Arc<dyn PromptSource>,
}

impl ResourceService {
    /// Create a new ResourceService over the given prompt source.
    pub fn new(source: Arc<dyn PromptSource>) -> Self {
        Self { source }
    }

    /// List every prompt as a resource.
    pub async fn list_resources(&self) -> Result<Vec<Resource>, PromptError> {
        let records = self.source.load_all().await?;
        Ok(records.iter().map(to_resource).collect())
    }

    /// Resource templates for addressing a prompt by identifier.
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        vec![
            RawResourceTemplate {
                uri_template: format!("{}{{id}}", PROMPT_URI_PREFIX),
                name: "Prompt Templates".to_string(),
                title: Some("Prompt by identifier".to_string()),
                description: Some(
                    "Read a normalized prompt record by its id, name or title".to_string(),
                ),
                mime_type: Some(PROMPT_MIME_TYPE.to_string()),
            }
            .no_annotation(),
        ]
    }

    /// Read a prompt resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, PromptError> {
        let identifier = parse_prompt_uri(uri)?;
        debug!("Reading prompt resource: {}", identifier);

        let record = self.source.find_by_id(identifier).await?;
        let text = serde_json::to_string_pretty(&record).map_err(|e| {
            PromptError::serialization(format!("Failed to serialize prompt resource {}", uri), e)
        })?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: uri.to_string(),
                mime_type: Some(PROMPT_MIME_TYPE.to_string()),
                text,
                meta: None,
            }],
        })
    }
}

/// Extract the identifier from a `prompt:///<identifier>` URI.
pub fn parse_prompt_uri(uri: &str) -> Result<&str, PromptError> {
    uri.strip_prefix(PROMPT_URI_PREFIX)
        .filter(|identifier| !identifier.is_empty())
        .ok_or_else(|| {
            PromptError::validation(
                "Invalid prompt URI",
                vec![FieldError::new(
                    "uri",
                    format!("Invalid prompt URI format: {}", uri),
                )],
            )
        })
}

fn to_resource(record: &PromptRecord) -> Resource {
    let mut raw = RawResource::new(
        format!("{}{}", PROMPT_URI_PREFIX, record.identifier()),
        record.display_name(),
    );
    raw.description = record.description().map(str::to_string);
    raw.mime_type = Some(PROMPT_MIME_TYPE.to_string());
    raw.no_annotation()
}
