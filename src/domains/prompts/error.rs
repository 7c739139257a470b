//! Prompt-specific error types.
//!
//! Every failure in the prompts domain is one of the kinds below. Each kind
//! can be flattened into an [`ErrorRecord`] for logging or for returning
//! across the protocol boundary.

use rmcp::ErrorData as McpError;
use serde::Serialize;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A single field-level problem found while validating caller input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// The offending field.
    pub field: String,

    /// What is wrong with it.
    pub message: String,
}

impl FieldError {
    /// Create a new field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur during prompt operations.
#[derive(Debug, Error)]
pub enum PromptError {
    /// No prompt matched the requested identifier.
    #[error("Prompt not found: {id}")]
    NotFound { id: String },

    /// The prompt store could not be read.
    #[error("{message}")]
    Load {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Caller input failed validation.
    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },

    /// The templating engine rejected a template.
    #[error("Failed to render template: {template_id}")]
    Render {
        template_id: String,
        #[source]
        source: mustache::Error,
    },

    /// A prompt file is not valid JSON or violates the record schema.
    #[error("Invalid prompt format in {}: {reason}", path.display())]
    Format { path: PathBuf, reason: String },
}

/// Flat, serializable form of a [`PromptError`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    pub name: &'static str,
    pub code: &'static str,
    pub message: String,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl PromptError {
    /// Create a new "not found" error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a new "load" error wrapping an I/O failure.
    pub fn load(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Load {
            message: message.into(),
            source,
        }
    }

    /// Load error for a response that could not be serialized.
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::load(message, source.into())
    }

    /// Create a new validation error carrying field-level problems.
    pub fn validation(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self::Validation {
            message: message.into(),
            errors,
        }
    }

    /// Validation error for a single bad tool argument.
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::validation("Invalid arguments", vec![FieldError::new(field, message)])
    }

    /// Create a new render error.
    pub fn render(template_id: impl Into<String>, source: mustache::Error) -> Self {
        Self::Render {
            template_id: template_id.into(),
            source,
        }
    }

    /// Create a new format error for the given prompt file.
    pub fn format(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::Format {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Error class name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "PromptNotFoundError",
            Self::Load { .. } => "PromptLoadError",
            Self::Validation { .. } => "ValidationError",
            Self::Render { .. } => "TemplateRenderError",
            Self::Format { .. } => "InvalidPromptFormatError",
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "PROMPT_NOT_FOUND",
            Self::Load { .. } => "PROMPT_LOAD_ERROR",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Render { .. } => "TEMPLATE_RENDER_ERROR",
            Self::Format { .. } => "INVALID_PROMPT_FORMAT",
        }
    }

    /// HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation { .. } => 400,
            Self::Load { .. } | Self::Render { .. } | Self::Format { .. } => 500,
        }
    }

    /// Structured details for this error kind.
    pub fn details(&self) -> Option<Value> {
        let details = match self {
            Self::NotFound { id } => json!({ "promptId": id }),
            Self::Load { source, .. } => json!({ "cause": source.to_string() }),
            Self::Validation { errors, .. } => json!({ "errors": errors }),
            Self::Render {
                template_id,
                source,
            } => json!({ "templateId": template_id, "cause": source.to_string() }),
            Self::Format { path, reason } => json!({
                "filePath": path.display().to_string(),
                "reason": reason,
            }),
        };
        Some(details)
    }

    /// Flatten the error into its serializable record.
    pub fn to_record(&self) -> ErrorRecord {
        ErrorRecord {
            name: self.name(),
            code: self.code(),
            message: self.to_string(),
            status_code: self.status_code(),
            details: self.details(),
        }
    }
}

impl From<PromptError> for McpError {
    fn from(err: PromptError) -> Self {
        let data = serde_json::to_value(err.to_record()).ok();
        let message = err.to_string();
        match err {
            PromptError::NotFound { .. } => McpError::resource_not_found(message, data),
            PromptError::Validation { .. } => McpError::invalid_params(message, data),
            PromptError::Load { .. } | PromptError::Render { .. } | PromptError::Format { .. } => {
                McpError::internal_error(message, data)
            }
        }
    }
}
