//! Directory state and selection management.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use fileselect_core::{
    EngineConfig, EngineError, EntryFilter, Explorer, Manipulator, RandomSource,
};
use globset::Glob;
use tracing::debug;

/// Stateful selection over one directory at a time.
///
/// Single caller, no internal locking. Share one engine between sessions and
/// they share one directory and one selection.
#[derive(Debug)]
pub struct SelectionEngine<E, M, R> {
    pub(crate) explorer: E,
    pub(crate) manipulator: M,
    pub(crate) random: R,
    pub(crate) config: EngineConfig,
    filter: EntryFilter,
    pub(crate) current_directory: Option<PathBuf>,
    pub(crate) entries: Vec<String>,
    pub(crate) selection: HashSet<String>,
}

impl<E, M, R> SelectionEngine<E, M, R>
where
    E: Explorer,
    M: Manipulator,
    R: RandomSource,
{
    /// Create an engine with the default configuration.
    pub fn new(explorer: E, manipulator: M, random: R) -> Self {
        Self {
            explorer,
            manipulator,
            random,
            config: EngineConfig::default(),
            filter: EntryFilter::default(),
            current_directory: None,
            entries: Vec::new(),
            selection: HashSet::new(),
        }
    }

    /// Create an engine with a custom configuration.
    pub fn with_config(
        explorer: E,
        manipulator: M,
        random: R,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        let filter = config.entry_filter()?;
        Ok(Self {
            config,
            filter,
            ..Self::new(explorer, manipulator, random)
        })
    }

    /// Load `path` as the current directory.
    ///
    /// Replaces the entry list and clears the selection, even when `path` is
    /// the directory already loaded. On failure nothing changes.
    pub fn load_directory(&mut self, path: impl Into<PathBuf>) -> Result<Vec<String>, EngineError> {
        let path = path.into();
        let entries = self.list(&path)?;

        self.entries = entries;
        self.selection.clear();
        debug!(dir = %path.display(), count = self.entries.len(), "loaded directory");
        self.current_directory = Some(path);

        Ok(self.entries.clone())
    }

    /// Re-list the current directory, keeping selected entries that still exist.
    pub fn refresh(&mut self) -> Result<Vec<String>, EngineError> {
        let path = self
            .current_directory
            .clone()
            .ok_or(EngineError::NoDirectoryLoaded)?;
        let entries = self.list(&path)?;

        let present: HashSet<&str> = entries.iter().map(String::as_str).collect();
        let before = self.selection.len();
        self.selection.retain(|name| present.contains(name.as_str()));
        debug!(
            dir = %path.display(),
            count = entries.len(),
            dropped = before - self.selection.len(),
            "refreshed directory"
        );
        self.entries = entries;

        Ok(self.entries.clone())
    }

    fn list(&self, path: &Path) -> Result<Vec<String>, EngineError> {
        let listed = self
            .explorer
            .list_entries(path)
            .map_err(|source| EngineError::Load {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(listed
            .into_iter()
            .filter(|name| self.filter.allows(name))
            .collect())
    }

    /// The loaded directory, if any.
    pub fn current_directory(&self) -> Option<&Path> {
        self.current_directory.as_deref()
    }

    /// Entry names as last listed.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Selected entry names, in listing order.
    pub fn selected_entries(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|name| self.selection.contains(*name))
            .cloned()
            .collect()
    }

    /// Number of selected entries.
    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    /// Check if `name` is selected.
    pub fn is_selected(&self, name: &str) -> bool {
        self.selection.contains(name)
    }

    /// Select an entry. Selecting an already selected entry is a no-op.
    pub fn select(&mut self, name: &str) -> Result<(), EngineError> {
        if !self.entries.iter().any(|entry| entry == name) {
            return Err(EngineError::EntryNotFound {
                name: name.to_string(),
            });
        }
        if self.selection.insert(name.to_string()) {
            debug!(entry = name, "selected");
        }
        Ok(())
    }

    /// Select several entries at once.
    ///
    /// Every name is checked before any is selected, so an unknown name
    /// leaves the selection untouched.
    pub fn select_many<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), EngineError> {
        if let Some(missing) = names
            .iter()
            .map(AsRef::as_ref)
            .find(|name| !self.entries.iter().any(|entry| entry == name))
        {
            return Err(EngineError::EntryNotFound {
                name: missing.to_string(),
            });
        }
        for name in names {
            self.select(name.as_ref())?;
        }
        Ok(())
    }

    /// Deselect an entry. Unselected or unknown names are ignored.
    pub fn deselect(&mut self, name: &str) {
        if self.selection.remove(name) {
            debug!(entry = name, "deselected");
        }
    }

    /// Flip the selection state of an entry, returning the new state.
    pub fn toggle(&mut self, name: &str) -> Result<bool, EngineError> {
        if self.selection.remove(name) {
            return Ok(false);
        }
        self.select(name)?;
        Ok(true)
    }

    /// Select every entry whose name matches a glob pattern.
    ///
    /// Returns how many entries were newly selected.
    pub fn select_matching(&mut self, pattern: &str) -> Result<usize, EngineError> {
        let matcher = Glob::new(pattern)
            .map_err(|e| EngineError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?
            .compile_matcher();

        let mut added = 0;
        for name in &self.entries {
            if matcher.is_match(name) && self.selection.insert(name.clone()) {
                added += 1;
            }
        }
        debug!(pattern, added, "selected by pattern");
        Ok(added)
    }

    /// Select every entry.
    pub fn select_all(&mut self) {
        self.selection.extend(self.entries.iter().cloned());
    }

    /// Clear the selection.
    pub fn deselect_all(&mut self) {
        self.selection.clear();
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The explorer capability.
    pub fn explorer(&self) -> &E {
        &self.explorer
    }

    /// The manipulator capability.
    pub fn manipulator(&self) -> &M {
        &self.manipulator
    }
}
