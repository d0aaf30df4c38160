//! Project Configuration (perfsuite.toml)
//!
//! Handles project-level configuration stored in `perfsuite.toml` at the
//! suite root.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = "perfsuite.toml";

/// Project configuration from perfsuite.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Suite settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suite: Option<SuiteConfig>,
}

/// Suite settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct SuiteConfig {
    /// Runtime directory propagated to every unit build
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_dir: Option<PathBuf>,

    /// Build tool program (default: "make")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,

    /// Attempt remaining units after a failure (default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_going: Option<bool>,
}

impl ProjectConfig {
    /// Load project configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|error| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error,
        })
    }
}
