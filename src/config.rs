//! Dispatch configuration
//!
//! Timing and tolerance settings shared by the key tracker and the platform
//! click synthesizer, loaded from YAML.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::bindings::ConfigError;

/// Dispatcher settings that can be overridden from a config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Two presses of the same key (or button) closer than this are a double-click
    #[serde(default = "default_double_click_interval_ms")]
    pub double_click_interval_ms: u64,

    /// Max pointer travel in pixels between press and release for a click
    #[serde(default = "default_click_slop")]
    pub click_slop: f64,
}

fn default_double_click_interval_ms() -> u64 {
    300
}

fn default_click_slop() -> f64 {
    4.0
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            double_click_interval_ms: default_double_click_interval_ms(),
            click_slop: default_click_slop(),
        }
    }
}

impl DispatchConfig {
    pub fn double_click_interval(&self) -> Duration {
        Duration::from_millis(self.double_click_interval_ms)
    }

    /// Parse config from a YAML string; missing fields take their defaults
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load config from disk, or return defaults if missing or unreadable
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Io(format!("{}: {}", parent.display(), e))
            })?;
        }

        let content =
            serde_yaml::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
