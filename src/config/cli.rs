//! Filesystem storage for batch sheets and lookup reports.

use crate::core::Storage;
use crate::utils::error::{LookupError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reads and writes files under `root`. Absolute paths bypass the root.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Storage for paths typed on the command line.
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

/// Keeps the offending path in the message shown to the user.
fn at_path(path: &Path, e: io::Error) -> LookupError {
    LookupError::IoError(io::Error::new(
        e.kind(),
        format!("{}: {}", path.display(), e),
    ))
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let sheet = self.resolve(path);
        fs::read(&sheet).map_err(|e| at_path(&sheet, e))
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let report = self.resolve(path);
        if let Some(dir) = report.parent() {
            fs::create_dir_all(dir).map_err(|e| at_path(dir, e))?;
        }
        fs::write(&report, data).map_err(|e| at_path(&report, e))
    }
}
