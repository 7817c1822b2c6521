//! Directory listing against the local filesystem.

use std::fs;
use std::path::Path;

use fileselect_core::{Explorer, FsError};
use tracing::debug;

/// Lists directories with `std::fs`. Names come back sorted.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalExplorer;

impl LocalExplorer {
    /// Create a new explorer.
    pub fn new() -> Self {
        Self
    }
}

impl Explorer for LocalExplorer {
    fn list_entries(&self, dir: &Path) -> Result<Vec<String>, FsError> {
        let entries = fs::read_dir(dir).map_err(|e| FsError::io(dir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| FsError::io(dir, e))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();

        debug!(dir = %dir.display(), count = names.len(), "listed directory");
        Ok(names)
    }

    // Broken symlinks count as existing so generated names never land on one.
    fn exists(&self, path: &Path) -> bool {
        path.symlink_metadata().is_ok()
    }

    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }
}
