//! User settings for the termreel CLI.
//!
//! Stored as TOML in `<config dir>/termreel/config.toml`. The location can be
//! overridden with the `TERMREEL_CONFIG` environment variable. A missing file
//! means "all defaults".

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::replay::Pacing;

/// Environment variable overriding the settings file location.
pub const CONFIG_ENV: &str = "TERMREEL_CONFIG";

/// Top-level settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub log: LogSettings,
}

/// Defaults for `termreel play`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Multiplier applied to every delay (0.5 plays twice as fast)
    pub speed_factor: f64,
    /// Use recorded delays instead of frameDelay/maxIdleTime
    pub real_timing: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            speed_factor: 1.0,
            real_timing: false,
        }
    }
}

impl PlaybackSettings {
    /// Apply these defaults on top of a session's own pacing.
    pub fn apply(&self, pacing: Pacing) -> Pacing {
        pacing
            .real_timing(self.real_timing)
            .speed_factor(self.speed_factor)
    }
}

/// Logging defaults, used when neither `-v` nor `RUST_LOG` is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Resolve the settings file path.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("termreel").join("config.toml"))
    }

    /// Load settings from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path()?)
    }

    /// Load settings from `path`, falling back to defaults if it doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings: {}", path.display()))
    }

    /// Save settings to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::config_path()?)
    }

    /// Save settings to `path`, creating parent directories as needed.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write settings: {}", path.display()))
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
