//! Configuration Loader
//!
//! Handles loading and merging configuration from multiple sources with proper precedence.

use crate::global::GlobalConfig;
use crate::project::{ProjectConfig, SuiteConfig, CONFIG_FILE_NAME};
use crate::ConfigResult;
use std::env;
use std::path::{Path, PathBuf};

/// Default build tool when nothing configures one
pub const DEFAULT_TOOL: &str = "make";

/// Configuration loader
///
/// Loads configuration from multiple sources and merges them with proper precedence:
/// 1. Global config (~/.perfsuite/config.toml) - lowest priority
/// 2. Project config (./perfsuite.toml) - overrides global
/// 3. Environment variables (PERFSUITE_*) - overrides project
/// 4. CLI flags - highest priority (handled by caller)
pub struct ConfigLoader {
    /// Cached global config path
    global_config_path: Option<PathBuf>,
}

/// Merged configuration result
#[derive(Debug, Clone)]
pub struct Config {
    /// Project configuration
    pub project: ProjectConfig,

    /// Global configuration
    pub global: GlobalConfig,

    /// Project root directory (where perfsuite.toml was found)
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Configured runtime directory, project over global; unresolved and
    /// possibly relative (resolution happens once, later, per invocation)
    pub fn runtime_dir(&self) -> Option<&Path> {
        self.suite_value(|s| s.runtime_dir.as_deref())
    }

    /// Configured build tool, defaulting to `make`
    pub fn tool(&self) -> &str {
        self.suite_value(|s| s.tool.as_deref())
            .unwrap_or(DEFAULT_TOOL)
    }

    /// Whether to keep attempting units after a failure
    pub fn keep_going(&self) -> bool {
        self.suite_value(|s| s.keep_going).unwrap_or(false)
    }

    fn suite_value<'a, T>(&'a self, pick: impl Fn(&'a SuiteConfig) -> Option<T>) -> Option<T> {
        self.project
            .suite
            .as_ref()
            .and_then(&pick)
            .or_else(|| self.global.suite.as_ref().and_then(&pick))
    }
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            global_config_path: None,
        }
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find perfsuite.toml, then loads and
    /// merges global config if it exists. A missing project config is not
    /// an error; the runtime directory may still arrive via environment or
    /// CLI flag.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<Config> {
        let (project_root, project_config) = self.find_project_config(start_dir)?;

        let global_config = self.load_global_config().unwrap_or_default();

        let project_config = self.apply_env_overrides(project_config);

        Ok(Config {
            project: project_config,
            global: global_config,
            project_root,
        })
    }

    /// Load configuration from a specific project config file
    pub fn load_from_file(&mut self, config_path: &Path) -> ConfigResult<Config> {
        let project_config = ProjectConfig::load_from_file(config_path)?;
        let global_config = self.load_global_config().unwrap_or_default();
        let project_config = self.apply_env_overrides(project_config);

        let project_root = config_path.parent().map(|p| p.to_path_buf());

        Ok(Config {
            project: project_config,
            global: global_config,
            project_root,
        })
    }

    /// Find project configuration by walking up directory tree
    ///
    /// Returns (project_root, project_config), or defaults if no
    /// perfsuite.toml exists anywhere up the tree.
    fn find_project_config(
        &self,
        start_dir: &Path,
    ) -> ConfigResult<(Option<PathBuf>, ProjectConfig)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);

            if config_path.exists() {
                let project_config = ProjectConfig::load_from_file(&config_path)?;
                return Ok((Some(current), project_config));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => {
                    return Ok((None, ProjectConfig::default()));
                }
            }
        }
    }

    /// Load global configuration from ~/.perfsuite/config.toml
    fn load_global_config(&mut self) -> ConfigResult<GlobalConfig> {
        if self.global_config_path.is_none() {
            self.global_config_path = Some(GlobalConfig::global_config_path()?);
        }

        let path = self
            .global_config_path
            .as_ref()
            .expect("global config path cached above");

        // Global config is optional - if it doesn't exist, return default
        if !path.exists() {
            return Ok(GlobalConfig::default());
        }

        GlobalConfig::load_from_file(path)
    }

    /// Apply environment variable overrides to project config
    ///
    /// Recognized variables: PERFSUITE_RUNTIME_DIR, PERFSUITE_TOOL,
    /// PERFSUITE_KEEP_GOING.
    fn apply_env_overrides(&self, mut config: ProjectConfig) -> ProjectConfig {
        let suite = config.suite.get_or_insert_with(SuiteConfig::default);

        if let Ok(runtime_dir) = env::var("PERFSUITE_RUNTIME_DIR") {
            suite.runtime_dir = Some(PathBuf::from(runtime_dir));
        }

        if let Ok(tool) = env::var("PERFSUITE_TOOL") {
            suite.tool = Some(tool);
        }

        if let Ok(keep_going) = env::var("PERFSUITE_KEEP_GOING") {
            let value = matches!(keep_going.to_lowercase().as_str(), "true" | "1" | "yes");
            suite.keep_going = Some(value);
        }

        config
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use std::fs;

    fn clear_env() {
        env::remove_var("PERFSUITE_RUNTIME_DIR");
        env::remove_var("PERFSUITE_TOOL");
        env::remove_var("PERFSUITE_KEEP_GOING");
    }

    #[test]
    #[serial]
    fn test_load_from_directory_finds_config() {
        clear_env();
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "[suite]\nruntime-dir = \"/opt/runtime\"\n",
        )
        .unwrap();

        let mut loader = ConfigLoader::new();
        let config = loader.load_from_directory(tmp.path()).unwrap();

        assert_eq!(config.runtime_dir(), Some(Path::new("/opt/runtime")));
        assert_eq!(config.project_root.as_deref(), Some(tmp.path()));
    }

    #[test]
    #[serial]
    fn test_load_from_directory_walks_up() {
        clear_env();
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "[suite]\ntool = \"gmake\"\n").unwrap();
        let nested = tmp.path().join("lock_chains").join("deep");
        fs::create_dir_all(&nested).unwrap();

        let mut loader = ConfigLoader::new();
        let config = loader.load_from_directory(&nested).unwrap();

        assert_eq!(config.tool(), "gmake");
        assert_eq!(config.project_root.as_deref(), Some(tmp.path()));
    }

    #[test]
    #[serial]
    fn test_load_from_directory_without_config() {
        clear_env();
        let tmp = tempfile::tempdir().unwrap();

        let mut loader = ConfigLoader::new();
        let config = loader.load_from_directory(tmp.path()).unwrap();

        assert!(config.runtime_dir().is_none());
        assert_eq!(config.tool(), DEFAULT_TOOL);
        assert!(!config.keep_going());
    }

    #[test]
    #[serial]
    fn test_env_overrides_project_config() {
        clear_env();
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "[suite]\nruntime-dir = \"/from/file\"\ntool = \"gmake\"\n",
        )
        .unwrap();

        env::set_var("PERFSUITE_RUNTIME_DIR", "/from/env");
        env::set_var("PERFSUITE_KEEP_GOING", "yes");

        let mut loader = ConfigLoader::new();
        let config = loader.load_from_directory(tmp.path()).unwrap();

        assert_eq!(config.runtime_dir(), Some(Path::new("/from/env")));
        // Untouched keys keep their file values
        assert_eq!(config.tool(), "gmake");
        assert!(config.keep_going());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_keep_going_false_values() {
        clear_env();
        let tmp = tempfile::tempdir().unwrap();

        env::set_var("PERFSUITE_KEEP_GOING", "0");
        let mut loader = ConfigLoader::new();
        let config = loader.load_from_directory(tmp.path()).unwrap();
        assert!(!config.keep_going());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        clear_env();
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[suite]\nkeep-going = true\n").unwrap();

        let mut loader = ConfigLoader::new();
        let config = loader.load_from_file(&path).unwrap();

        assert!(config.keep_going());
        assert_eq!(config.project_root.as_deref(), Some(tmp.path()));
    }

    #[test]
    #[serial]
    fn test_global_fills_gaps_left_by_project() {
        clear_env();
        let global = GlobalConfig {
            suite: Some(SuiteConfig {
                runtime_dir: Some(PathBuf::from("/global/runtime")),
                tool: Some("gmake".to_string()),
                keep_going: None,
            }),
        };
        let project = ProjectConfig {
            suite: Some(SuiteConfig {
                runtime_dir: Some(PathBuf::from("/project/runtime")),
                tool: None,
                keep_going: None,
            }),
        };

        let config = Config {
            project,
            global,
            project_root: None,
        };

        // Project wins where set, global backfills the rest
        assert_eq!(config.runtime_dir(), Some(Path::new("/project/runtime")));
        assert_eq!(config.tool(), "gmake");
        assert!(!config.keep_going());
    }
}
