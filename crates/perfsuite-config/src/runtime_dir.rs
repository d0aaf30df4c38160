//! Runtime directory resolution
//!
//! The runtime directory may be configured as a relative path. Every unit
//! sub-invocation runs with a different working directory, so the value is
//! resolved to a canonical absolute path exactly once per top-level
//! invocation, against the working directory current at that moment, and
//! the resolved value is propagated unchanged to every unit.

use crate::{ConfigError, ConfigResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve the configured runtime directory to a canonical absolute path
///
/// Fails before any unit runs when the value is unset, does not exist, or
/// is not a directory.
pub fn resolve_runtime_dir(value: Option<&Path>) -> ConfigResult<PathBuf> {
    let path = value.ok_or(ConfigError::RuntimeDirUnset)?;

    if !path.exists() {
        return Err(ConfigError::RuntimeDirNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(ConfigError::RuntimeDirNotADirectory(path.to_path_buf()));
    }

    Ok(fs::canonicalize(path)?)
}
