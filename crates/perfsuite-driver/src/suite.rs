//! The fixed benchmark unit set
//!
//! The suite is a declaration-ordered list of benchmark units, each backed
//! by its own subdirectory with an independent build description. Order
//! affects only display and log sequencing; the units are independent.

use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Names of the standard suite units, in declaration order
pub const UNIT_NAMES: [&str; 6] = [
    "event_latency",
    "event_throughput",
    "lock_chains",
    "lock_contention",
    "reducetest",
    "task_throughput",
];

/// One named benchmark unit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Unit {
    /// Unit name, also the name of its subdirectory
    pub name: &'static str,
}

impl Unit {
    /// Directory backing this unit under the suite root
    pub fn dir(&self, suite_root: &Path) -> PathBuf {
        suite_root.join(self.name)
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Presence of a unit's directory on disk
#[derive(Debug, Clone)]
pub struct UnitPresence {
    pub unit: Unit,
    /// Expected directory for the unit
    pub dir: PathBuf,
    /// Whether the directory exists
    pub present: bool,
    /// Whether the directory carries a build description (`Makefile`)
    pub has_build_file: bool,
}

/// The ordered set of benchmark units
#[derive(Debug, Clone)]
pub struct Suite {
    units: Vec<Unit>,
}

impl Suite {
    /// The standard six-unit suite
    pub fn standard() -> Self {
        Self {
            units: UNIT_NAMES.iter().map(|&name| Unit { name }).collect(),
        }
    }

    /// Units in declaration order
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Number of units in the suite
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the suite is empty
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Scan the suite root and report which unit directories exist
    ///
    /// Only the top level of the root is inspected; the contents of each
    /// unit directory stay opaque apart from the build-file check.
    pub fn scan(&self, suite_root: &Path) -> Vec<UnitPresence> {
        let on_disk: HashSet<String> = WalkDir::new(suite_root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_dir())
            .filter_map(|e| e.file_name().to_str().map(String::from))
            .collect();

        self.units
            .iter()
            .map(|unit| {
                let dir = unit.dir(suite_root);
                let present = on_disk.contains(unit.name);
                let has_build_file = present && dir.join("Makefile").is_file();
                UnitPresence {
                    unit: unit.clone(),
                    dir,
                    present,
                    has_build_file,
                }
            })
            .collect()
    }
}

impl Default for Suite {
    fn default() -> Self {
        Self::standard()
    }
}
