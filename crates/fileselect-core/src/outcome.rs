//! Batch operation outcome types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The kind of batch operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OperationKind {
    Copy,
    Move,
    Delete,
}

impl OperationKind {
    /// Whether a successful operation removes the source entry.
    pub fn removes_source(self) -> bool {
        matches!(self, Self::Move | Self::Delete)
    }

    fn past_tense(self) -> &'static str {
        match self {
            Self::Copy => "Copied",
            Self::Move => "Moved",
            Self::Delete => "Deleted",
        }
    }
}

/// A failure for one entry within an otherwise continuing batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryError {
    /// Name of the entry that failed.
    pub entry: String,
    /// A human-readable error message.
    pub message: String,
    /// The operation that was attempted.
    pub kind: OperationKind,
}

impl EntryError {
    /// Create a new entry error.
    pub fn new(entry: impl Into<String>, message: impl Into<String>, kind: OperationKind) -> Self {
        Self {
            entry: entry.into(),
            message: message.into(),
            kind,
        }
    }
}

impl std::fmt::Display for EntryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.kind, self.entry, self.message)
    }
}

/// Result of a completed batch operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationOutcome {
    /// The operation that ran.
    pub kind: OperationKind,
    /// Resolved destination directory. Always `None` for delete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<PathBuf>,
    /// Entries processed successfully, in processing order.
    pub succeeded: Vec<String>,
    /// Per-entry failures, in processing order.
    pub errors: Vec<EntryError>,
}

impl OperationOutcome {
    /// Create an empty outcome.
    pub fn new(kind: OperationKind, destination: Option<PathBuf>) -> Self {
        Self {
            kind,
            destination,
            succeeded: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Check if every entry succeeded.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get a human-readable summary of the operation.
    pub fn summary(&self) -> String {
        let action = self.kind.past_tense();
        if self.errors.is_empty() {
            format!("{} {} items", action, self.succeeded.len())
        } else {
            format!(
                "{} {} items, {} failed",
                action,
                self.succeeded.len(),
                self.errors.len()
            )
        }
    }
}
