//! Persistent user settings.

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, eyre};
use fileselect_core::EngineConfig;
use fileselect_ops::ConflictPolicy;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Settings stored in `settings.toml` under the user config directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Move deleted entries to the trash.
    pub use_trash: bool,
    /// What to do when a copy or move target exists.
    pub conflict: ConflictPolicy,
    /// Show entries starting with '.'.
    pub include_hidden: bool,
    /// Glob patterns left out of listings.
    pub ignore_patterns: Vec<String>,
    /// Random name attempts before numbered names are used.
    pub max_name_attempts: usize,
}

impl Default for UserSettings {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            use_trash: false,
            conflict: ConflictPolicy::default(),
            include_hidden: engine.include_hidden,
            ignore_patterns: engine.ignore_patterns,
            max_name_attempts: engine.max_name_attempts,
        }
    }
}

impl UserSettings {
    /// Get the config file path.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("fileselect").join("settings.toml"))
    }

    /// Load settings from the default location, or return defaults.
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load settings from `path`. A missing or malformed file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed settings");
                Self::default()
            }
        }
    }

    /// Save settings to the default location.
    pub fn save(&self) -> std::io::Result<()> {
        let path = Self::config_path().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "No config directory")
        })?;
        self.save_to(&path)
    }

    /// Save settings to `path`, creating its parent directory.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        std::fs::write(path, content)
    }

    /// Engine configuration described by these settings.
    pub fn engine_config(&self) -> Result<EngineConfig> {
        EngineConfig::builder()
            .max_name_attempts(self.max_name_attempts)
            .include_hidden(self.include_hidden)
            .ignore_patterns(self.ignore_patterns.clone())
            .build()
            .map_err(|e| eyre!("Invalid settings: {e}"))
    }
}
