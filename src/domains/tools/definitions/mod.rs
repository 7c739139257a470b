//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file with its parameters, argument
//! validation, `execute()` and route construction.

pub mod render_prompt;
pub mod search_prompts;

pub use render_prompt::{RenderPromptParams, RenderPromptTool};
pub use search_prompts::{SearchPromptsParams, SearchPromptsTool};
