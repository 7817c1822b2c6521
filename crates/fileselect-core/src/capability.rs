//! Capabilities consumed by the selection engine.
//!
//! The engine never touches the filesystem or a random number generator
//! directly. Real implementations live in `fileselect-ops`; tests supply
//! deterministic doubles.

use std::path::Path;

use crate::FsError;

/// Read-only view of the filesystem.
pub trait Explorer {
    /// List the immediate entry names of `dir`.
    ///
    /// # Errors
    ///
    /// Fails if `dir` does not exist, is not a directory or cannot be read.
    fn list_entries(&self, dir: &Path) -> Result<Vec<String>, FsError>;

    /// Returns `true` if something exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if `path` exists and is a directory.
    fn is_directory(&self, path: &Path) -> bool;
}

/// Filesystem mutations, one call per entry.
pub trait Manipulator {
    /// Copy `source` (file or directory) to `target`.
    fn copy(&self, source: &Path, target: &Path) -> Result<(), FsError>;

    /// Move `source` (file or directory) to `target`.
    fn move_to(&self, source: &Path, target: &Path) -> Result<(), FsError>;

    /// Delete `path` (file or directory).
    fn delete(&self, path: &Path) -> Result<(), FsError>;

    /// Create `path` as a directory. Succeeds if it already is one.
    fn create_directory(&self, path: &Path) -> Result<(), FsError>;
}

/// Source of uniformly distributed integers.
pub trait RandomSource {
    /// Return an integer in `[0, max)`. `max` is always non-zero.
    fn next_int(&mut self, max: usize) -> usize;
}

impl<T: Explorer + ?Sized> Explorer for &T {
    fn list_entries(&self, dir: &Path) -> Result<Vec<String>, FsError> {
        (**self).list_entries(dir)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_directory(&self, path: &Path) -> bool {
        (**self).is_directory(path)
    }
}

impl<T: Manipulator + ?Sized> Manipulator for &T {
    fn copy(&self, source: &Path, target: &Path) -> Result<(), FsError> {
        (**self).copy(source, target)
    }

    fn move_to(&self, source: &Path, target: &Path) -> Result<(), FsError> {
        (**self).move_to(source, target)
    }

    fn delete(&self, path: &Path) -> Result<(), FsError> {
        (**self).delete(path)
    }

    fn create_directory(&self, path: &Path) -> Result<(), FsError> {
        (**self).create_directory(path)
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_int(&mut self, max: usize) -> usize {
        (**self).next_int(max)
    }
}

impl<T: RandomSource + ?Sized> RandomSource for Box<T> {
    fn next_int(&mut self, max: usize) -> usize {
        (**self).next_int(max)
    }
}
