//! Global Configuration (~/.perfsuite/config.toml)
//!
//! User-wide defaults, lowest precedence in the configuration hierarchy.

use crate::project::SuiteConfig;
use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct GlobalConfig {
    /// Default suite settings applied when the project config is silent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suite: Option<SuiteConfig>,
}

impl GlobalConfig {
    /// Path to the global configuration file (~/.perfsuite/config.toml)
    pub fn global_config_path() -> ConfigResult<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".perfsuite").join("config.toml"))
            .ok_or(ConfigError::NoHomeDirectory)
    }

    /// Load global configuration from a file
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
