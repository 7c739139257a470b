//! Resources domain module.
//!
//! Prompt records double as MCP resources: each record can be listed and
//! read as JSON under a `prompt:///` URI.
//!
//! ## Architecture
//!
//! - `service.rs` - Resource listing, resource templates and reads

mod service;

pub use service::{PROMPT_MIME_TYPE, PROMPT_URI_PREFIX, ResourceService, parse_prompt_uri};
