//! Prompt records and their on-disk schema.
//!
//! A prompt file holds either one JSON object or an array of objects. Each
//! object is validated into a [`PromptRecord`] exactly once, and the aliased
//! fields (`id`/`name`/`title`, `prompt`/`template`) are resolved there.

use rmcp::model::PromptArgument;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use super::error::PromptError;

/// Reasons a single JSON entry is not a valid prompt.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("expected a JSON object")]
    NotAnObject,

    #[error("missing required field: one of 'id', 'name' or 'title'")]
    MissingIdentifier,

    #[error("missing required field: one of 'prompt' or 'template'")]
    MissingBody,

    #[error("{0}")]
    Malformed(#[from] serde_json::Error),
}

/// Schema describing the variables a template expects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSchema {
    /// Variable name to its description.
    #[serde(default)]
    pub properties: BTreeMap<String, PropertySchema>,

    /// Names of the variables that must be supplied.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One variable declared in an [`InputSchema`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InputSchema {
    /// Declared variables as protocol prompt arguments.
    pub fn arguments(&self) -> Vec<PromptArgument> {
        self.properties
            .iter()
            .map(|(name, property)| PromptArgument {
                name: name.clone(),
                title: None,
                description: Some(property.description.clone().unwrap_or_default()),
                required: Some(self.required.contains(name)),
            })
            .collect()
    }
}

/// An entry as written in a prompt file, before validation.
#[derive(Debug, Deserialize)]
struct RawPromptEntry {
    id: Option<String>,
    name: Option<String>,
    title: Option<String>,
    prompt: Option<String>,
    template: Option<String>,
    description: Option<String>,
    #[serde(rename = "inputSchema", alias = "input_schema")]
    input_schema: Option<InputSchema>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// A validated, normalized prompt template.
///
/// Records are built fresh from disk on every load and never mutated.
/// Serializing a record yields the normalized form: `name` and `prompt` are
/// always present and unknown fields are written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptRecord {
    #[serde(skip)]
    identifier: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,

    prompt: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    input_schema: Option<InputSchema>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Empty strings count as absent, matching how prompt files are authored.
fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

impl PromptRecord {
    /// Validate one JSON entry and resolve its aliased fields.
    pub fn from_value(value: Value) -> Result<Self, EntryError> {
        if !value.is_object() {
            return Err(EntryError::NotAnObject);
        }

        let raw: RawPromptEntry = serde_json::from_value(value)?;
        let id = present(raw.id);
        let name = present(raw.name);
        let title = present(raw.title);
        let prompt = present(raw.prompt);
        let template = present(raw.template);

        let identifier = id
            .clone()
            .or_else(|| name.clone())
            .or_else(|| title.clone())
            .ok_or(EntryError::MissingIdentifier)?;
        let body = prompt
            .or_else(|| template.clone())
            .ok_or(EntryError::MissingBody)?;
        let display_name = name
            .or_else(|| title.clone())
            .unwrap_or_else(|| identifier.clone());

        Ok(Self {
            identifier,
            id,
            name: display_name,
            title,
            prompt: body,
            template,
            description: raw.description,
            input_schema: raw.input_schema,
            extra: raw.extra,
        })
    }

    /// Resolved identifier (`id`, else `name`, else `title`).
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Resolved display name (`name`, else `title`).
    pub fn display_name(&self) -> &str {
        &self.name
    }

    /// Template text (`prompt`, else `template`).
    pub fn body(&self) -> &str {
        &self.prompt
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn input_schema(&self) -> Option<&InputSchema> {
        self.input_schema.as_ref()
    }

    /// Fields this server does not interpret.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Whether `identifier` equals this record's `id`, `name` or `title`.
    pub fn matches(&self, identifier: &str) -> bool {
        self.id.as_deref() == Some(identifier)
            || self.name == identifier
            || self.title.as_deref() == Some(identifier)
    }

    /// Protocol arguments declared by the input schema.
    pub fn arguments(&self) -> Vec<PromptArgument> {
        self.input_schema
            .as_ref()
            .map(InputSchema::arguments)
            .unwrap_or_default()
    }

    /// Top-level category: the identifier up to its first `/`.
    pub fn category(&self) -> &str {
        self.identifier
            .split('/')
            .next()
            .unwrap_or(&self.identifier)
    }
}

/// Parse the contents of one prompt file into its records.
///
/// Arrays are flattened in order. Any invalid entry fails the whole file
/// with a format error naming the file (and the array index, if any).
pub fn parse_prompt_file(path: &Path, content: &str) -> Result<Vec<PromptRecord>, PromptError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| PromptError::format(path, format!("invalid JSON: {}", e)))?;

    match value {
        Value::Array(entries) => entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                PromptRecord::from_value(entry)
                    .map_err(|e| PromptError::format(path, format!("entry {}: {}", index, e)))
            })
            .collect(),
        Value::Object(_) => PromptRecord::from_value(value)
            .map(|record| vec![record])
            .map_err(|e| PromptError::format(path, e.to_string())),
        _ => Err(PromptError::format(
            path,
            "expected an object or an array of objects",
        )),
    }
}
