//! Prompts domain module.
//!
//! Prompt templates live as JSON files below a prompts directory. Each file
//! holds one prompt object or an array of them. Nothing is cached: every
//! operation re-reads the directory tree.
//!
//! ## Architecture
//!
//! - `record.rs` - Prompt record schema, validation and alias resolution
//! - `store.rs` - File discovery, full loads and lookup by identifier
//! - `templates.rs` - Template rendering (Mustache)
//! - `search.rs` - Substring search and the empty-query summary
//! - `service.rs` - Prompt operations used by the server and the tools
//! - `error.rs` - Error taxonomy shared by all prompt operations

mod error;
mod record;
mod search;
mod service;
mod store;
pub mod templates;

pub use error::{ErrorRecord, FieldError, PromptError};
pub use record::{EntryError, InputSchema, PromptRecord, PropertySchema, parse_prompt_file};
pub use search::{SearchOutcome, SearchSummary, search};
pub use service::PromptService;
pub use store::{FilePromptStore, PROMPT_FILE_EXTENSION, PromptSource};
pub use templates::TemplateRenderer;
