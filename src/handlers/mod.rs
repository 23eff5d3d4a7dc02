//! MCP tool handlers for the to-do list server
//!
//! Each group of tools lives in its own file; the `#[tool]` methods in
//! `lib.rs` delegate here.

pub mod lists;
pub mod persistence;
pub mod tasks;

/// Convert a library error into a public MCP error
pub(crate) fn to_mcp_error(e: crate::Error) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(e.to_string(), true)
}

/// List names are stored trimmed, so every lookup trims too
pub(crate) fn list_name(name: &str) -> &str {
    name.trim()
}
