//! Error types for tdl-mcp
//!
//! Addressing and parse errors are returned to the caller. Save never fails
//! because of empty lists (those are reported in [`crate::SaveReport`]), and
//! load collects corrupt lines instead of aborting.

use thiserror::Error;

/// Main error type for to-do list operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("List '{0}' already exists")]
    DuplicateListName(String),

    #[error("List '{0}' not found")]
    ListNotFound(String),

    #[error("Task created at {created_at} not found in list '{list}'")]
    TaskNotFound { list: String, created_at: f64 },

    #[error("A task created at {created_at} already exists in list '{list}'")]
    DuplicateTask { list: String, created_at: f64 },

    #[error("Malformed date '{0}'. Use MM/DD/YYYY HH:MM (e.g., '01/05/2024 09:07') or MM/DD/YYYY HR:MN for no deadline")]
    MalformedDateText(String),

    #[error("Corrupt record on line {line}: {reason}")]
    CorruptPersistedRecord { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
