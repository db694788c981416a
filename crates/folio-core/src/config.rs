//! Configuration management for Folio.
//!
//! `config.toml` lives in the Folio home directory (see [`paths`]). Every table
//! is optional; missing keys take their defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::parallax::ParallaxWeights;
use crate::reveal::RevealSettings;

/// Returns the embedded default config template.
pub fn default_config_template() -> &'static str {
    include_str!("../assets/default_config.toml")
}

pub mod paths {
    //! Path resolution for Folio configuration and data directories.
    //!
    //! FOLIO_HOME resolution order:
    //! 1. FOLIO_HOME environment variable (if set)
    //! 2. ~/.config/folio (default)

    use std::path::{Path, PathBuf};

    /// Returns the Folio home directory, `None` if no home directory is known.
    pub fn folio_home() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("FOLIO_HOME")
            && !home.is_empty()
        {
            return Some(PathBuf::from(home));
        }

        dirs::home_dir().map(|h| h.join(".config").join("folio"))
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> Option<PathBuf> {
        folio_home().map(|home| home.join("config.toml"))
    }

    /// Returns the path to the persisted preferences file.
    pub fn preferences_path() -> Option<PathBuf> {
        folio_home().map(|home| home.join("preferences.toml"))
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> Option<PathBuf> {
        folio_home().map(|home| home.join("logs"))
    }

    /// Expands a leading `~/` to the user's home directory.
    pub fn expand_tilde(path: &Path) -> PathBuf {
        if let Ok(rest) = path.strip_prefix("~")
            && let Some(home) = dirs::home_dir()
        {
            return home.join(rest);
        }
        path.to_path_buf()
    }
}

/// Reveal timing, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub start_delay_ms: u64,
    pub tick_ms: u64,
    pub blink_interval_ms: u64,
    pub blink_duration_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        let defaults = RevealSettings::default();
        Self {
            start_delay_ms: defaults.start_delay.as_millis() as u64,
            tick_ms: defaults.tick_interval.as_millis() as u64,
            blink_interval_ms: defaults.blink_interval.as_millis() as u64,
            blink_duration_ms: defaults.blink_duration.as_millis() as u64,
        }
    }
}

impl RevealConfig {
    pub fn settings(&self) -> RevealSettings {
        RevealSettings {
            start_delay: Duration::from_millis(self.start_delay_ms),
            tick_interval: Duration::from_millis(self.tick_ms),
            blink_interval: Duration::from_millis(self.blink_interval_ms),
            blink_duration: Duration::from_millis(self.blink_duration_ms),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Show the diagnostic status line on startup.
    pub show_status_line: bool,

    /// Optional profile TOML replacing the bundled content.
    pub profile_file: Option<PathBuf>,

    pub reveal: RevealConfig,

    pub parallax: ParallaxWeights,
}

impl Config {
    /// Loads configuration from the default config path.
    ///
    /// Returns defaults when no home directory can be determined.
    pub fn load() -> Result<Self> {
        match paths::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
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

    /// Profile file with `~` expanded.
    pub fn profile_path(&self) -> Option<PathBuf> {
        self.profile_file.as_deref().map(paths::expand_tilde)
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nonexistent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[reveal]\ntick_ms = 40\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.reveal.tick_ms, 40);
        assert_eq!(
            config.reveal.start_delay_ms,
            RevealConfig::default().start_delay_ms
        );
        assert_eq!(config.parallax, ParallaxWeights::default());
    }

    #[test]
    fn test_load_parallax_override() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(
            &config_path,
            "[parallax.primary]\nscroll_x = 0.0\nscroll_y = 0.5\npointer = 0.0\n",
        )
        .unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.parallax.primary.scroll_y, 0.5);
        assert_eq!(
            config.parallax.secondary,
            ParallaxWeights::default().secondary
        );
    }

    #[test]
    fn test_load_invalid_toml_reports_path() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "show_status_line = maybe").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"));
    }

    #[test]
    fn test_default_template_parses_to_defaults() {
        let config: Config = toml::from_str(default_config_template()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_init_creates_config_with_template() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# tick_ms = 90"));
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "").unwrap();

        assert!(Config::init(&config_path).is_err());
    }

    #[test]
    fn test_reveal_settings_conversion() {
        let settings = RevealConfig {
            start_delay_ms: 1,
            tick_ms: 2,
            blink_interval_ms: 3,
            blink_duration_ms: 4,
        }
        .settings();
        assert_eq!(settings.start_delay, Duration::from_millis(1));
        assert_eq!(settings.blink_duration, Duration::from_millis(4));
    }

    #[test]
    fn test_expand_tilde_leaves_absolute_paths() {
        let path = Path::new("/tmp/profile.toml");
        assert_eq!(paths::expand_tilde(path), path);
    }
}
