//! Error types for filesystem capabilities and the selection engine.

use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by `Explorer` and `Manipulator` implementations.
#[derive(Debug, Error)]
pub enum FsError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Path is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Something already exists at the target path.
    #[error("Already exists: {path}")]
    AlreadyExists { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Other error.
    #[error("{message}")]
    Other { message: String },
}

impl FsError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create an error from a plain message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

/// Precondition failures. The call was rejected and no state changed.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A batch operation was requested with an empty selection.
    #[error("Nothing selected")]
    NothingSelected,

    /// The named entry is not in the current directory listing.
    #[error("Entry not found: {name}")]
    EntryNotFound { name: String },

    /// An operation needs a current directory but none was loaded.
    #[error("No directory loaded")]
    NoDirectoryLoaded,

    /// The directory could not be listed.
    #[error("Failed to load {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    /// The destination directory could not be created.
    #[error("Failed to create destination {path}: {source}")]
    Destination {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    /// A glob pattern could not be compiled.
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}
