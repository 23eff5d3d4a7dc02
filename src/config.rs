//! Server configuration
//!
//! Read from an optional TOML file; command-line flags override it.
//!
//! ```toml
//! data_file = "listdata.txt"
//! autosave = false
//! log_filter = "tdl_mcp=debug"
//! ```

use crate::error::Result;
use crate::storage::DEFAULT_DATA_FILE;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Flat file holding the lists
    pub data_file: PathBuf,
    /// Save after every mutating tool call
    pub autosave: bool,
    /// `tracing` filter used when `RUST_LOG` is not set
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            autosave: false,
            log_filter: None,
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }
}
