//! Configuration management for FlexPad.
//!
//! Loads configuration from ${FLEXPAD_HOME}/config.toml with sensible defaults.
//! Settings changed at runtime (appearance, font weight) are never written back.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Color scheme for the whole window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    #[default]
    Dark,
    Light,
}

impl Appearance {
    /// Returns the other appearance.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Appearance::Dark => Appearance::Light,
            Appearance::Light => Appearance::Dark,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Appearance::Dark => "dark",
            Appearance::Light => "light",
        }
    }
}

/// Font weight used for the text area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    pub fn display_name(&self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }

    /// Returns all weights in picker order.
    pub fn all() -> &'static [FontWeight] {
        &[FontWeight::Normal, FontWeight::Bold]
    }
}

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for FlexPad configuration and the diagnostic log.
    //!
    //! FLEXPAD_HOME resolution order:
    //! 1. FLEXPAD_HOME environment variable (if set)
    //! 2. ~/.config/flexpad (default)
    //! 3. <temp dir>/flexpad when no home directory can be determined

    use std::path::PathBuf;

    /// File name of the diagnostic log inside the system temp directory.
    pub const LOG_FILE_NAME: &str = "flexpad.log";

    /// Returns the FlexPad home directory.
    pub fn flexpad_home() -> PathBuf {
        if let Ok(home) = std::env::var("FLEXPAD_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || std::env::temp_dir().join("flexpad"),
            |h| h.join(".config").join("flexpad"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        flexpad_home().join("config.toml")
    }

    /// Returns the default diagnostic log path.
    pub fn default_log_path() -> PathBuf {
        std::env::temp_dir().join(LOG_FILE_NAME)
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds of inactivity before autosave (0 disables)
    pub autosave_delay_secs: u64,

    /// Initial color scheme
    pub appearance: Appearance,

    /// Initial font weight of the text area
    pub font_weight: FontWeight,

    /// Soft-wrap long lines
    pub wrap: bool,

    /// Start with the welcome text
    pub welcome_text: bool,

    /// Diagnostic log filter directive
    pub log_level: String,

    /// Diagnostic log file override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            autosave_delay_secs: Self::DEFAULT_AUTOSAVE_DELAY_SECS,
            appearance: Appearance::default(),
            font_weight: FontWeight::default(),
            wrap: true,
            welcome_text: true,
            log_level: Self::DEFAULT_LOG_LEVEL.to_string(),
            log_file: None,
        }
    }
}

impl Config {
    const DEFAULT_AUTOSAVE_DELAY_SECS: u64 = 60;
    const DEFAULT_LOG_LEVEL: &str = "info";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the commented default config to `path`.
    ///
    /// Fails if the file already exists (no silent overwrite).
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Returns the autosave debounce delay, or `None` when autosave is disabled.
    pub fn autosave_delay(&self) -> Option<Duration> {
        if self.autosave_delay_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.autosave_delay_secs))
        }
    }

    /// Returns the effective diagnostic log path.
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(paths::default_log_path)
    }

    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}
