//! Perfsuite Configuration System
//!
//! Provides configuration management for the suite driver including:
//! - Project configuration (perfsuite.toml)
//! - Global user configuration (~/.perfsuite/config.toml)
//! - Environment variable overrides (PERFSUITE_*)
//! - Runtime directory resolution
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded and merged in the following order (later overrides earlier):
//! 1. Global config (~/.perfsuite/config.toml)
//! 2. Project config (./perfsuite.toml)
//! 3. Environment variables (PERFSUITE_*)
//! 4. CLI flags

pub mod global;
pub mod loader;
pub mod project;
pub mod runtime_dir;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("No runtime directory configured. Set it via --runtime-dir, PERFSUITE_RUNTIME_DIR, or perfsuite.toml")]
    RuntimeDirUnset,

    #[error("Runtime directory does not exist: {0}")]
    RuntimeDirNotFound(PathBuf),

    #[error("Runtime directory is not a directory: {0}")]
    RuntimeDirNotADirectory(PathBuf),

    #[error("Could not determine home directory for global configuration")]
    NoHomeDirectory,

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

pub use global::GlobalConfig;
pub use loader::{Config, ConfigLoader};
pub use project::{ProjectConfig, SuiteConfig, CONFIG_FILE_NAME};
pub use runtime_dir::resolve_runtime_dir;
