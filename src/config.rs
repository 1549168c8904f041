use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default location of the document file, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "data/notes.json";

/// Configuration for the note store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the JSON document file holding the `notes` table.
    pub db_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

impl StoreConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Use `db_path` if given, otherwise the default location.
    ///
    /// The CLI resolves `--db` and the `NOIR_DB` environment variable before
    /// calling this.
    pub fn resolve(db_path: Option<PathBuf>) -> Self {
        db_path.map(Self::new).unwrap_or_default()
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}
