//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - The default repeat duration
//! - Poll cadence and display window
//! - Notification preferences
//!
//! Configuration is stored at `~/.config/chime/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::config_path;
use crate::error::{ConfigError, Result};
use crate::notify::Volume;
use crate::timer::{IntervalLength, DEFAULT_INTERVAL_SECS};

/// Timer cadence configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Default repeat duration in seconds, used when `run` is given no
    /// interval.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: f64,
    /// Poll cadence in milliseconds. Ring detection is accurate to this.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Width of the render bucket. The remaining-time text repaints only
    /// near bucket boundaries.
    #[serde(default = "default_display_window_ms")]
    pub display_window_ms: u64,
}

/// Notification configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub volume: Volume,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/chime/config.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

// Default functions
fn default_interval_secs() -> f64 {
    DEFAULT_INTERVAL_SECS
}
fn default_tick_ms() -> u64 {
    10
}
fn default_display_window_ms() -> u64 {
    200
}
fn default_true() -> bool {
    true
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            tick_ms: default_tick_ms(),
            display_window_ms: default_display_window_ms(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: Volume::default(),
        }
    }
}

impl Config {
    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load from an explicit path; a missing file writes the default there.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to
    /// disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        Some(match key {
            "timer.interval_secs" => self.timer.interval_secs.to_string(),
            "timer.tick_ms" => self.timer.tick_ms.to_string(),
            "timer.display_window_ms" => self.timer.display_window_ms.to_string(),
            "notifications.enabled" => self.notifications.enabled.to_string(),
            "notifications.volume" => self.notifications.volume.level().to_string(),
            _ => return None,
        })
    }

    /// Set a config value by key. Every key is typed, so the value is
    /// parsed and validated here; persisting is the caller's move.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be
    /// parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "timer.interval_secs" => {
                let secs: f64 = parse_value(key, value)?;
                let interval =
                    IntervalLength::new(secs).map_err(|e| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: e.to_string(),
                    })?;
                self.timer.interval_secs = interval.as_secs();
            }
            "timer.tick_ms" => {
                self.timer.tick_ms = parse_nonzero(key, value)?;
            }
            "timer.display_window_ms" => {
                self.timer.display_window_ms = parse_nonzero(key, value)?;
            }
            "notifications.enabled" => {
                self.notifications.enabled = parse_value(key, value)?;
            }
            "notifications.volume" => {
                self.notifications.volume = Volume::new(parse_value(key, value)?);
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string()).into()),
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| {
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

fn parse_nonzero(key: &str, value: &str) -> Result<u64> {
    let parsed: u64 = parse_value(key, value)?;
    if parsed == 0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "must be greater than zero".into(),
        }
        .into());
    }
    Ok(parsed)
}
