//! YAML configuration parsing for trigger bindings
//!
//! Parses bindings files into `(action, triggers)` pairs that can be applied
//! to an [`InputTriggerMap`].

use std::path::Path;

use serde::Deserialize;

use super::maps::InputTriggerMap;
use crate::trigger::{parse_triggers, InputTrigger, TriggerError};

/// Root structure of a bindings YAML file
#[derive(Debug, Deserialize)]
pub struct BindingsFile {
    pub bindings: Vec<BindingEntry>,
}

/// A single binding entry as written in YAML
#[derive(Debug, Clone, Deserialize)]
pub struct BindingEntry {
    pub action: String,
    pub triggers: Vec<String>,
    #[serde(default)]
    pub platform: Option<String>,
}

/// A parsed binding: one action and the triggers that invoke it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingConfig {
    pub action: String,
    pub triggers: Vec<InputTrigger>,
}

impl BindingConfig {
    /// Bind every trigger to the action
    pub fn apply_to(&self, map: &mut InputTriggerMap) {
        for trigger in &self.triggers {
            map.put(trigger.clone(), self.action.as_str());
        }
    }
}

/// Apply a list of parsed bindings in order
pub fn apply_to(bindings: &[BindingConfig], map: &mut InputTriggerMap) {
    for binding in bindings {
        binding.apply_to(map);
    }
}

/// Load bindings from a YAML file
pub fn load_bindings_file(path: &Path) -> Result<Vec<BindingConfig>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

    parse_bindings_yaml(&content)
}

/// Parse bindings from a YAML string
pub fn parse_bindings_yaml(yaml: &str) -> Result<Vec<BindingConfig>, ConfigError> {
    let file: BindingsFile =
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;

    resolve_entries(file.bindings)
}

/// Turn raw YAML entries into bindings, skipping other platforms
pub fn resolve_entries(entries: Vec<BindingEntry>) -> Result<Vec<BindingConfig>, ConfigError> {
    let current_platform = current_platform();
    let mut bindings = Vec::with_capacity(entries.len());

    for entry in entries {
        if let Some(ref platform) = entry.platform {
            if platform != current_platform {
                continue;
            }
        }

        let mut triggers = Vec::new();
        for descriptor in &entry.triggers {
            let parsed = parse_triggers(descriptor).map_err(|source| ConfigError::Trigger {
                action: entry.action.clone(),
                source,
            })?;
            triggers.extend(parsed);
        }

        bindings.push(BindingConfig {
            action: entry.action,
            triggers,
        });
    }

    Ok(bindings)
}

fn current_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else {
        "linux"
    }
}

/// Errors that can occur when loading binding files or saving settings
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Serialize(String),
    Trigger { action: String, source: TriggerError },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Serialize(e) => write!(f, "Serialize error: {}", e),
            ConfigError::Trigger { action, source } => {
                write!(f, "Bad trigger for '{}': {}", action, source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Trigger { source, .. } => Some(source),
            _ => None,
        }
    }
}
