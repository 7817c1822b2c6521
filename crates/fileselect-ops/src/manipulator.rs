//! Copy, move and delete against the local filesystem.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fileselect_core::{FsError, Manipulator};
use tracing::{debug, trace};

use crate::conflict::{ConflictPolicy, auto_rename_path};

/// Performs filesystem mutations with `std::fs` and the system trash.
#[derive(Debug, Clone, Default)]
pub struct LocalManipulator {
    /// Whether deletions go to the system trash.
    pub use_trash: bool,
    /// How to handle copy and move targets that already exist.
    pub conflict: ConflictPolicy,
}

impl LocalManipulator {
    /// Create a manipulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether deletions go to the system trash.
    pub fn with_trash(mut self, use_trash: bool) -> Self {
        self.use_trash = use_trash;
        self
    }

    /// Set the conflict policy.
    pub fn with_conflict(mut self, conflict: ConflictPolicy) -> Self {
        self.conflict = conflict;
        self
    }

    /// Decide where a transfer actually lands, clearing the way if needed.
    fn prepare_target(&self, target: &Path) -> Result<PathBuf, FsError> {
        if target.symlink_metadata().is_err() {
            return Ok(target.to_path_buf());
        }

        match self.conflict {
            ConflictPolicy::Skip => Err(FsError::AlreadyExists {
                path: target.to_path_buf(),
            }),
            ConflictPolicy::Overwrite => {
                remove_path(target)?;
                Ok(target.to_path_buf())
            }
            ConflictPolicy::AutoRename => auto_rename_path(target),
        }
    }
}

impl Manipulator for LocalManipulator {
    fn copy(&self, source: &Path, target: &Path) -> Result<(), FsError> {
        let file_type = file_type(source)?;
        check_not_into_itself(source, target, "copy")?;
        check_not_same_file(source, target)?;
        let target = self.prepare_target(target)?;

        let bytes = copy_entry(source, &target, file_type)?;

        debug!(source = %source.display(), target = %target.display(), bytes, "copied");
        Ok(())
    }

    fn move_to(&self, source: &Path, target: &Path) -> Result<(), FsError> {
        // A missing source must not clear an existing target under Overwrite.
        let file_type = file_type(source)?;
        check_not_into_itself(source, target, "move")?;
        check_not_same_file(source, target)?;
        let target = self.prepare_target(target)?;

        match fs::rename(source, &target) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                trace!(source = %source.display(), "rename crosses devices, copying instead");
                copy_entry(source, &target, file_type)?;
                remove_path(source)?;
            }
            Err(e) => return Err(FsError::io(source, e)),
        }

        debug!(source = %source.display(), target = %target.display(), "moved");
        Ok(())
    }

    fn delete(&self, path: &Path) -> Result<(), FsError> {
        if self.use_trash {
            path.symlink_metadata().map_err(|e| FsError::io(path, e))?;
            trash::delete(path)
                .map_err(|e| FsError::other(format!("Failed to move to trash: {e}")))?;
        } else {
            remove_path(path)?;
        }

        debug!(path = %path.display(), trash = self.use_trash, "deleted");
        Ok(())
    }

    fn create_directory(&self, path: &Path) -> Result<(), FsError> {
        if path.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(path).map_err(|e| FsError::io(path, e))
    }
}

/// Refuse to copy or move a directory into itself.
fn check_not_into_itself(source: &Path, target: &Path, verb: &str) -> Result<(), FsError> {
    if source.is_dir() && target.starts_with(source) {
        return Err(FsError::other(format!(
            "Cannot {verb} a directory into itself"
        )));
    }
    Ok(())
}

/// Refuse a transfer whose target resolves to the source itself.
///
/// Overwrite would otherwise delete the source before copying it.
fn check_not_same_file(source: &Path, target: &Path) -> Result<(), FsError> {
    let resolved = |path: &Path| {
        let name = path.file_name()?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::canonicalize(parent).ok().map(|parent| parent.join(name))
    };
    let source_path = resolved(source);
    if source_path.is_some() && source_path == resolved(target) {
        return Err(FsError::other(format!(
            "Source and destination are the same file: {}",
            source.display()
        )));
    }
    Ok(())
}

/// File type of `path` without following a final symlink.
fn file_type(path: &Path) -> Result<fs::FileType, FsError> {
    path.symlink_metadata()
        .map(|m| m.file_type())
        .map_err(|e| FsError::io(path, e))
}

/// Copy a file, directory tree or symlink according to its type.
fn copy_entry(source: &Path, dest: &Path, file_type: fs::FileType) -> Result<u64, FsError> {
    if file_type.is_symlink() {
        copy_symlink(source, dest)?;
        Ok(0)
    } else if file_type.is_dir() {
        copy_dir_recursive(source, dest)
    } else {
        copy_file(source, dest)
    }
}

/// Recreate a symlink at `dest` pointing where `source` points.
#[cfg(unix)]
fn copy_symlink(source: &Path, dest: &Path) -> Result<(), FsError> {
    let link = fs::read_link(source).map_err(|e| FsError::io(source, e))?;
    std::os::unix::fs::symlink(&link, dest).map_err(|e| FsError::io(dest, e))
}

#[cfg(not(unix))]
fn copy_symlink(source: &Path, _dest: &Path) -> Result<(), FsError> {
    Err(FsError::other(format!(
        "Refusing to copy symlink {}",
        source.display()
    )))
}

/// Remove a file, symlink or directory tree.
fn remove_path(path: &Path) -> Result<(), FsError> {
    let metadata = path.symlink_metadata().map_err(|e| FsError::io(path, e))?;
    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| FsError::io(path, e))
}

/// Copy a single file.
fn copy_file(source: &Path, dest: &Path) -> Result<u64, FsError> {
    fs::copy(source, dest).map_err(|e| FsError::io(source, e))
}

/// Recursively copy a directory.
fn copy_dir_recursive(source: &Path, dest: &Path) -> Result<u64, FsError> {
    fs::create_dir_all(dest).map_err(|e| FsError::io(dest, e))?;

    let mut total_bytes = 0u64;

    let entries = fs::read_dir(source).map_err(|e| FsError::io(source, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| FsError::io(source, e))?;
        let path = entry.path();
        let dest_path = dest.join(entry.file_name());
        let file_type = entry.file_type().map_err(|e| FsError::io(&path, e))?;

        total_bytes += copy_entry(&path, &dest_path, file_type)?;
    }

    Ok(total_bytes)
}
