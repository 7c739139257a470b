//! Domains module containing business logic organized by bounded contexts.
//!
//! `prompts` owns the prompt store and all prompt operations; `resources`
//! and `tools` expose those operations through the matching MCP surfaces.

pub mod prompts;
pub mod resources;
pub mod tools;
