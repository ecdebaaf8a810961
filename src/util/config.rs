//! Configuration file support for recipe.
//!
//! Two configuration file locations are read:
//! - Global: `<config dir>/config.toml` - User-wide defaults
//! - Project: `.recipe/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.
//!
//! ```toml
//! [settings]
//! compiler = "gcc"
//! build_type = "Debug"
//!
//! [output]
//! json = false
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// recipe configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Values for settings axes, keyed by axis name
    pub settings: BTreeMap<String, String>,

    /// Output settings
    pub output: OutputConfig,
}

/// Output-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Print evaluated manifests as JSON by default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

impl OutputConfig {
    /// Whether JSON output is the default. Off unless a config turns it on.
    pub fn json(&self) -> bool {
        self.json.unwrap_or(false)
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        self.settings.extend(other.settings);

        if other.output.json.is_some() {
            self.output.json = other.output.json;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.recipe/config.toml)
/// 2. Global config
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}
