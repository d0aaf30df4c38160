//! Per-unit and suite-level result reporting

use crate::error::{DriverError, DriverResult};
use crate::verb::Verb;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Output mode for suite execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Standard progress output
    Normal,
    /// Errors only
    Quiet,
    /// Detailed output with timing and command lines
    Verbose,
    /// Machine-readable JSON summary
    Json,
}

/// Final status of one unit within a suite run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitStatus {
    /// Sub-invocation exited zero
    Passed,
    /// Sub-invocation exited non-zero
    Failed,
    /// Planned but not spawned (dry run)
    Planned,
}

impl UnitStatus {
    /// Get status name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Planned => "planned",
        }
    }
}

/// Result of one unit's sub-invocation
#[derive(Debug, Clone)]
pub struct UnitReport {
    /// Unit name
    pub unit: String,
    /// Sub-target that was requested
    pub subtarget: String,
    /// Child exit code (absent for a dry run)
    pub exit_code: Option<i32>,
    /// Wall-clock time of the sub-invocation
    pub duration: Duration,
    /// Final status
    pub status: UnitStatus,
}

impl UnitReport {
    /// Check if the unit passed
    pub fn passed(&self) -> bool {
        self.status == UnitStatus::Passed
    }
}

/// Suite execution statistics
#[derive(Debug, Clone, Default)]
pub struct SuiteStats {
    /// Units in the suite
    pub total_units: usize,
    /// Units whose sub-invocation was started
    pub attempted: usize,
    /// Units that passed
    pub passed: usize,
    /// Units that failed
    pub failed: usize,
    /// Total wall-clock time for the whole suite
    pub total_time: Duration,
}

/// Result of driving the whole suite through one verb
#[derive(Debug)]
pub struct SuiteReport {
    /// Verb the suite was driven with
    pub verb: Verb,
    /// Absolute runtime directory every unit observed
    pub runtime_dir: PathBuf,
    /// Per-unit results, in declaration order; under the fail-fast policy
    /// the list stops at the first failing unit
    pub units: Vec<UnitReport>,
    /// Aggregate statistics
    pub stats: SuiteStats,
    /// Whether this was a dry run
    pub dry_run: bool,
}

impl SuiteReport {
    /// Check if every attempted unit passed
    pub fn success(&self) -> bool {
        self.units.iter().all(|u| u.status != UnitStatus::Failed)
    }

    /// First failing unit, if any
    pub fn first_failure(&self) -> Option<&UnitReport> {
        self.units.iter().find(|u| u.status == UnitStatus::Failed)
    }

    /// Convert the report into a result, surfacing the first failure
    pub fn to_result(&self) -> DriverResult<()> {
        match self.first_failure() {
            None => Ok(()),
            Some(unit) => Err(DriverError::UnitFailed {
                unit: unit.unit.clone(),
                verb: self.verb,
                code: unit.exit_code.unwrap_or(1),
            }),
        }
    }
}
