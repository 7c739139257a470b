//! Tools domain module.
//!
//! Tools are the functions MCP clients call directly: `renderPrompt` and
//! `searchPrompts`.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - ToolRouter builder used by the server handler
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Define params, `execute()`, `to_tool()` and `create_route()`
//! 3. Export in `definitions/mod.rs`
//! 4. Add the route and name in `router.rs`

pub mod definitions;
pub mod router;

pub use router::{build_tool_router, tool_names};
