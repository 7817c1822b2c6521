//! Conflict handling for copy and move targets.

use std::path::{Path, PathBuf};

use fileselect_core::FsError;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Upper bound on numbered names tried by [`auto_rename_path`].
const MAX_RENAME_ATTEMPTS: u32 = 1000;

/// What to do when a copy or move target already exists.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ConflictPolicy {
    /// Fail the entry and leave the existing item alone.
    #[default]
    Skip,
    /// Remove the existing item first.
    Overwrite,
    /// Pick a free name such as "file (1).txt".
    AutoRename,
}

/// Generate an auto-renamed path to avoid conflicts.
///
/// For "file.txt", tries "file (1).txt", "file (2).txt", etc.
pub fn auto_rename_path(path: &Path) -> Result<PathBuf, FsError> {
    let parent = path.parent().unwrap_or(Path::new(""));
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path.extension().map(|e| e.to_string_lossy().into_owned());

    for i in 1..=MAX_RENAME_ATTEMPTS {
        let new_name = match &extension {
            Some(ext) => format!("{stem} ({i}).{ext}"),
            None => format!("{stem} ({i})"),
        };

        let new_path = parent.join(&new_name);
        if new_path.symlink_metadata().is_err() {
            return Ok(new_path);
        }
    }

    Err(FsError::AlreadyExists {
        path: path.to_path_buf(),
    })
}
