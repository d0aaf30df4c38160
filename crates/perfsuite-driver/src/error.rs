/// Suite driver error types
use crate::verb::Verb;
use std::path::PathBuf;
use thiserror::Error;

pub type DriverResult<T> = Result<T, DriverError>;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Runtime directory must be absolute, got: {path}")]
    RuntimeDirNotAbsolute { path: PathBuf },

    #[error("Benchmark directory for unit '{unit}' not found: {path}")]
    UnitDirMissing { unit: String, path: PathBuf },

    #[error("Unknown verb '{0}'. Valid verbs are: run, build, clean")]
    UnknownVerb(String),

    #[error("Failed to launch '{tool}' for unit '{unit}': {error}")]
    Spawn {
        unit: String,
        tool: String,
        error: String,
    },

    #[error("Unit '{unit}' was interrupted by a signal during '{verb}'")]
    Interrupted { unit: String, verb: Verb },

    #[error("Unit '{unit}' failed during '{verb}' with exit code {code}")]
    UnitFailed {
        unit: String,
        verb: Verb,
        code: i32,
    },

    #[error("I/O error at {path}: {error}")]
    Io {
        path: PathBuf,
        error: std::io::Error,
    },
}

impl DriverError {
    /// Create a spawn error
    pub fn spawn(unit: impl Into<String>, tool: impl Into<String>, error: impl ToString) -> Self {
        Self::Spawn {
            unit: unit.into(),
            tool: tool.into(),
            error: error.to_string(),
        }
    }

    /// Create a missing unit directory error
    pub fn unit_dir_missing(unit: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::UnitDirMissing {
            unit: unit.into(),
            path: path.into(),
        }
    }

    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            error,
        }
    }
}
