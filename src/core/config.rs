//! User configuration.
//!
//! Settings are read from `config.json` in the skillsmith config directory. A
//! missing file means built-in defaults; command-line flags override whatever the
//! file says.

use crate::core::dirs::get_config_directory;
use crate::core::error::{Result, SkillsmithError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";

/// Name of the context directory inside the working repository
pub const CONTEXT_DIR: &str = ".agent";

/// Name of the skills root inside the context directory
pub const SKILLS_DIR: &str = "skills";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WatchSettings {
    pub interval_secs: u64,
    /// Tracked state file, relative to the working directory
    pub state_file: PathBuf,
    pub stale_hours: f64,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            interval_secs: 30,
            state_file: PathBuf::from(CONTEXT_DIR).join("STATE.md"),
            stale_hours: 24.0,
        }
    }
}

impl WatchSettings {
    pub fn validate(&self) -> Result<()> {
        if self.interval_secs == 0 {
            return Err(SkillsmithError::invalid_config(
                "watch interval must be at least 1 second",
            ));
        }
        if !self.stale_hours.is_finite() || self.stale_hours < 0.0 {
            return Err(SkillsmithError::invalid_config(format!(
                "stale hours must be a non-negative number (got {})",
                self.stale_hours
            )));
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub watch: WatchSettings,
    /// Skill catalog JSON; `.agent/catalog.json` when unset
    pub catalog_path: Option<PathBuf>,
}

impl Settings {
    /// Loads settings from the user config directory, falling back to
    /// defaults when no config file exists.
    pub fn load() -> Result<Self> {
        let config_file = get_config_directory()?.join(CONFIG_FILE);
        Self::load_from(&config_file)
    }

    pub fn load_from(config_file: &Path) -> Result<Self> {
        if !config_file.exists() {
            log::debug!("No config at {}, using defaults", config_file.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_file)
            .map_err(|e| SkillsmithError::config_read_failed(config_file, e))?;
        let settings: Settings = serde_json::from_str(&content)
            .map_err(|e| SkillsmithError::config_parse_failed(config_file, e))?;
        settings.watch.validate()?;

        Ok(settings)
    }
}
