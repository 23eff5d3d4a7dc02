use crate::codec::{self, Decoded};
use crate::error::Result;
use crate::model::ListStore;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default data file, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "listdata.txt";

/// Outcome of a save
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveReport {
    /// Lists written to the file
    pub written: Vec<String>,
    /// Empty lists left out of the file
    pub skipped_empty: Vec<String>,
}

impl SaveReport {
    /// `true` when no list was skipped
    pub fn is_complete(&self) -> bool {
        self.skipped_empty.is_empty()
    }
}

/// Flat-file persistence for a [`ListStore`]
pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Decode the data file
    ///
    /// A missing file decodes to nothing (zero lines read). Corrupt lines are
    /// reported in the result rather than failing the load.
    pub fn load(&self) -> Result<Decoded> {
        if !self.file_path.exists() {
            info!(path = %self.file_path.display(), "data file not found, nothing to load");
            return Ok(Decoded::default());
        }

        let content = fs::read_to_string(&self.file_path)?;
        let decoded = codec::decode(&content);
        info!(
            path = %self.file_path.display(),
            lists = decoded.lists.len(),
            corrupt = decoded.errors.len(),
            "loaded data file"
        );
        Ok(decoded)
    }

    /// Replace the data file with the encoded store
    ///
    /// Empty lists are skipped and reported; every other list is written.
    pub fn save(&self, store: &ListStore) -> Result<SaveReport> {
        let encoded = codec::encode(store);
        fs::write(&self.file_path, &encoded.text)?;
        info!(
            path = %self.file_path.display(),
            written = encoded.written.len(),
            skipped = encoded.skipped_empty.len(),
            "saved data file"
        );
        Ok(SaveReport {
            written: encoded.written,
            skipped_empty: encoded.skipped_empty,
        })
    }
}
