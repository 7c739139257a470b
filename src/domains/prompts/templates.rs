//! Template rendering.
//!
//! Prompt bodies are logic-less Mustache templates: `{{variable}}`
//! interpolation (HTML-escaped), `{{{variable}}}` raw interpolation,
//! `{{#section}}`/`{{^inverted}}` blocks and dotted names. The engine is the
//! `mustache` crate; this module only supplies the empty context when no
//! variables are given and wraps engine failures into [`PromptError::Render`].

use serde_json::{Map, Value};

use super::error::PromptError;

/// Renders prompt bodies against a set of variables.
///
/// Templates are compiled on every call, since prompt files are re-read on
/// every request as well.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    /// Create a renderer. Missing variables and sections render as empty.
    pub fn new() -> Self {
        Self
    }

    /// Render `template` for the prompt `template_id`.
    pub fn render(
        &self,
        template_id: &str,
        template: &str,
        variables: Option<&Map<String, Value>>,
    ) -> Result<String, PromptError> {
        let empty = Map::new();
        let context = variables.unwrap_or(&empty);

        mustache::compile_str(template)
            .and_then(|compiled| compiled.render_to_string(context))
            .map_err(|e| PromptError::render(template_id, e))
    }
}
