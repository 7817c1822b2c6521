//! Engine configuration types.

use derive_builder::Builder;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Configuration for the selection engine.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct EngineConfig {
    /// Random name attempts before falling back to numbered names.
    #[builder(default = "10")]
    #[serde(default = "default_max_name_attempts")]
    pub max_name_attempts: usize,

    /// Include hidden entries (starting with .).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_hidden: bool,

    /// Glob patterns for entry names to leave out of listings.
    #[builder(default)]
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_max_name_attempts() -> usize {
    10
}

impl EngineConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.max_name_attempts == Some(0) {
            return Err("max_name_attempts must be at least 1".to_string());
        }
        if let Some(ref patterns) = self.ignore_patterns {
            for pattern in patterns {
                Glob::new(pattern).map_err(|e| format!("Invalid pattern '{pattern}': {e}"))?;
            }
        }
        Ok(())
    }
}

impl EngineConfig {
    /// Create a new engine config builder.
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Compile the listing filter described by this config.
    pub fn entry_filter(&self) -> Result<EntryFilter, EngineError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.ignore_patterns {
            let glob = Glob::new(pattern).map_err(|e| EngineError::InvalidPattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
            builder.add(glob);
        }
        let ignore = builder.build().map_err(|e| EngineError::InvalidPattern {
            pattern: self.ignore_patterns.join(","),
            message: e.to_string(),
        })?;

        Ok(EntryFilter {
            include_hidden: self.include_hidden,
            ignore,
        })
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_name_attempts: default_max_name_attempts(),
            include_hidden: true,
            ignore_patterns: Vec::new(),
        }
    }
}

/// Compiled form of the listing rules in [`EngineConfig`].
#[derive(Debug, Clone)]
pub struct EntryFilter {
    include_hidden: bool,
    ignore: GlobSet,
}

impl Default for EntryFilter {
    fn default() -> Self {
        Self {
            include_hidden: true,
            ignore: GlobSet::empty(),
        }
    }
}

impl EntryFilter {
    /// Check if an entry name belongs in the listing.
    pub fn allows(&self, name: &str) -> bool {
        if !self.include_hidden && name.starts_with('.') {
            return false;
        }
        !self.ignore.is_match(name)
    }
}
