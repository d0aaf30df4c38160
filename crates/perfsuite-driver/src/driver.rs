//! Sequential suite orchestration
//!
//! The driver walks the fixed unit set in declaration order and performs
//! one sub-invocation per unit. Execution is strictly serial: the next
//! unit never starts before the previous child has exited. That is a hard
//! policy of the driver, not a property inherited from the build tool.

use crate::error::{DriverError, DriverResult};
use crate::invoke::{Invocation, ProcessInvoker, ToolInvoker, DEFAULT_TOOL};
use crate::report::{SuiteReport, SuiteStats, UnitReport, UnitStatus};
use crate::suite::Suite;
use crate::verb::Verb;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Driver configuration
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Root directory holding the unit subdirectories
    pub suite_root: PathBuf,
    /// Absolute runtime directory propagated to every unit
    pub runtime_dir: PathBuf,
    /// Build tool program invoked inside each unit directory
    pub tool: String,
    /// Attempt the remaining units after a failure; the aggregate result
    /// still fails and still names the first failing unit
    pub keep_going: bool,
    /// Print planned sub-invocations without spawning anything
    pub dry_run: bool,
    /// Detailed output with timing and command lines
    pub verbose: bool,
    /// Suppress progress output and child stdout echo
    pub quiet: bool,
}

/// Drives the benchmark suite through one verb at a time
pub struct SuiteDriver {
    suite: Suite,
    config: DriverConfig,
    invoker: Option<Box<dyn ToolInvoker>>,
}

impl std::fmt::Debug for SuiteDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuiteDriver")
            .field("suite", &self.suite)
            .field("config", &self.config)
            .field("invoker", &self.invoker.as_ref().map(|_| "<dyn ToolInvoker>"))
            .finish()
    }
}

impl SuiteDriver {
    /// Create a driver for the suite at `suite_root`
    ///
    /// `runtime_dir` must already be resolved to an absolute path; the
    /// resolution happens exactly once per top-level invocation, before
    /// the driver exists, so every unit observes an identical value.
    pub fn new(
        suite_root: impl Into<PathBuf>,
        runtime_dir: impl Into<PathBuf>,
    ) -> DriverResult<Self> {
        let runtime_dir = runtime_dir.into();
        if !runtime_dir.is_absolute() {
            return Err(DriverError::RuntimeDirNotAbsolute { path: runtime_dir });
        }

        Ok(Self {
            suite: Suite::standard(),
            config: DriverConfig {
                suite_root: suite_root.into(),
                runtime_dir,
                tool: DEFAULT_TOOL.to_string(),
                keep_going: false,
                dry_run: false,
                verbose: false,
                quiet: false,
            },
            invoker: None,
        })
    }

    /// Set the build tool program
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.config.tool = tool.into();
        self
    }

    /// Enable/disable continue-on-error
    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.config.keep_going = keep_going;
        self
    }

    /// Enable/disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.config.dry_run = dry_run;
        self
    }

    /// Enable/disable verbose output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Enable/disable quiet output
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.config.quiet = quiet;
        self
    }

    /// Replace the invoker (tests substitute an instrumented stub here)
    pub fn with_invoker(mut self, invoker: Box<dyn ToolInvoker>) -> Self {
        self.invoker = Some(invoker);
        self
    }

    /// The suite this driver iterates
    pub fn suite(&self) -> &Suite {
        &self.suite
    }

    /// Driver configuration
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Drive every unit through `verb`, in declaration order
    ///
    /// Sub-invocations are strictly sequential; each one blocks until its
    /// child exits. A non-zero exit is recorded in the report and, under
    /// the default fail-fast policy, stops the loop. A signal-terminated
    /// child aborts the remaining queue unconditionally.
    pub fn execute(&self, verb: Verb) -> DriverResult<SuiteReport> {
        let start = Instant::now();
        let total = self.suite.len();

        let process_invoker;
        let invoker: &dyn ToolInvoker = match &self.invoker {
            Some(custom) => custom.as_ref(),
            None => {
                process_invoker =
                    ProcessInvoker::new(&self.config.tool).with_quiet(self.config.quiet);
                &process_invoker
            }
        };

        let mut units = Vec::with_capacity(total);

        for (index, unit) in self.suite.units().iter().enumerate() {
            let dir = unit.dir(&self.config.suite_root);
            if !dir.is_dir() {
                return Err(DriverError::unit_dir_missing(unit.name, dir));
            }

            let invocation = Invocation {
                unit: unit.clone(),
                dir,
                subtarget: verb.subtarget(),
                runtime_dir: self.config.runtime_dir.clone(),
            };

            if self.config.dry_run {
                println!("[dry-run] {}", invocation.render(&self.config.tool));
                units.push(UnitReport {
                    unit: unit.name.to_string(),
                    subtarget: verb.subtarget().to_string(),
                    exit_code: None,
                    duration: Duration::ZERO,
                    status: UnitStatus::Planned,
                });
                continue;
            }

            if !self.config.quiet {
                println!("[{}/{}] {}: {}", index + 1, total, unit, verb.subtarget());
            }
            if self.config.verbose {
                println!("  {}", invocation.render(&self.config.tool));
            }

            let outcome = invoker.invoke(&invocation)?;

            if outcome.interrupted() {
                return Err(DriverError::Interrupted {
                    unit: unit.name.to_string(),
                    verb,
                });
            }

            if self.config.verbose {
                println!(
                    "  {} finished in {:.2}s",
                    unit,
                    outcome.elapsed.as_secs_f64()
                );
            }

            let status = if outcome.success() {
                UnitStatus::Passed
            } else {
                UnitStatus::Failed
            };
            units.push(UnitReport {
                unit: unit.name.to_string(),
                subtarget: verb.subtarget().to_string(),
                exit_code: outcome.exit_code,
                duration: outcome.elapsed,
                status,
            });

            if status == UnitStatus::Failed && !self.config.keep_going {
                break;
            }
        }

        let stats = SuiteStats {
            total_units: total,
            attempted: units
                .iter()
                .filter(|u| u.status != UnitStatus::Planned)
                .count(),
            passed: units.iter().filter(|u| u.passed()).count(),
            failed: units
                .iter()
                .filter(|u| u.status == UnitStatus::Failed)
                .count(),
            total_time: start.elapsed(),
        };

        Ok(SuiteReport {
            verb,
            runtime_dir: self.config.runtime_dir.clone(),
            units,
            stats,
            dry_run: self.config.dry_run,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoke::InvokeOutcome;
    use crate::suite::UNIT_NAMES;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Suite root with all six unit directories present
    fn suite_fixture() -> TempDir {
        let tmp = tempfile::tempdir().unwrap();
        for name in UNIT_NAMES {
            fs::create_dir(tmp.path().join(name)).unwrap();
        }
        tmp
    }

    /// Records every invocation; fails the units listed in `fail_units`
    /// and reports `None` exit codes for units in `signal_units`.
    #[derive(Default)]
    struct RecordingInvoker {
        seen: Mutex<Vec<(String, String, PathBuf)>>,
        fail_units: Vec<&'static str>,
        signal_units: Vec<&'static str>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl ToolInvoker for RecordingInvoker {
        fn invoke(&self, invocation: &Invocation) -> DriverResult<InvokeOutcome> {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(current, Ordering::SeqCst);

            self.seen.lock().unwrap().push((
                invocation.unit.name.to_string(),
                invocation.subtarget.to_string(),
                invocation.runtime_dir.clone(),
            ));

            let exit_code = if self.signal_units.contains(&invocation.unit.name) {
                None
            } else if self.fail_units.contains(&invocation.unit.name) {
                Some(2)
            } else {
                Some(0)
            };

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(InvokeOutcome {
                exit_code,
                stdout: String::new(),
                stderr: String::new(),
                elapsed: Duration::from_millis(1),
            })
        }
    }

    impl ToolInvoker for Arc<RecordingInvoker> {
        fn invoke(&self, invocation: &Invocation) -> DriverResult<InvokeOutcome> {
            self.as_ref().invoke(invocation)
        }
    }

    fn driver(root: &TempDir, invoker: RecordingInvoker) -> (SuiteDriver, Arc<RecordingInvoker>) {
        let invoker = Arc::new(invoker);
        let driver = SuiteDriver::new(root.path(), "/opt/runtime")
            .unwrap()
            .with_quiet(true)
            .with_invoker(Box::new(Arc::clone(&invoker)));
        (driver, invoker)
    }

    #[test]
    fn test_execute_invokes_each_unit_once_in_order() {
        let root = suite_fixture();
        let (driver, invoker) = driver(&root, RecordingInvoker::default());

        let report = driver.execute(Verb::Run).unwrap();
        assert!(report.success());

        let seen = invoker.seen.lock().unwrap().clone();
        let names: Vec<&str> = seen.iter().map(|(n, _, _)| n.as_str()).collect();
        assert_eq!(names, UNIT_NAMES.to_vec());
        assert_eq!(report.stats.attempted, 6);
        assert_eq!(report.stats.passed, 6);
    }

    #[test]
    fn test_execute_passes_identical_runtime_dir_to_every_unit() {
        let root = suite_fixture();
        let (driver, invoker) = driver(&root, RecordingInvoker::default());

        driver.execute(Verb::Build).unwrap();

        let seen = invoker.seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 6);
        assert!(seen
            .iter()
            .all(|(_, _, rt)| rt == &PathBuf::from("/opt/runtime")));
    }

    #[test]
    fn test_execute_maps_verbs_to_subtargets() {
        let root = suite_fixture();
        for (verb, subtarget) in [
            (Verb::Run, "run"),
            (Verb::Build, "all"),
            (Verb::Clean, "clean"),
        ] {
            let (driver, invoker) = driver(&root, RecordingInvoker::default());
            driver.execute(verb).unwrap();
            let seen = invoker.seen.lock().unwrap().clone();
            assert!(seen.iter().all(|(_, sub, _)| sub == subtarget));
        }
    }

    #[test]
    fn test_execute_is_strictly_sequential() {
        let root = suite_fixture();
        let (driver, invoker) = driver(&root, RecordingInvoker::default());

        driver.execute(Verb::Run).unwrap();

        let max = invoker.max_in_flight.load(Ordering::SeqCst);
        assert_eq!(max, 1, "sub-invocations must never overlap");
    }

    #[test]
    fn test_execute_fail_fast_stops_at_first_failure() {
        let root = suite_fixture();
        let (driver, invoker) = driver(
            &root,
            RecordingInvoker {
                fail_units: vec!["lock_chains"],
                ..Default::default()
            },
        );

        let report = driver.execute(Verb::Run).unwrap();
        assert!(!report.success());
        assert_eq!(report.first_failure().unwrap().unit, "lock_chains");

        // Units after the failing one are never attempted
        let seen = invoker.seen.lock().unwrap().clone();
        let names: Vec<&str> = seen.iter().map(|(n, _, _)| n.as_str()).collect();
        assert_eq!(names, vec!["event_latency", "event_throughput", "lock_chains"]);
        assert!(report.to_result().is_err());
    }

    #[test]
    fn test_execute_keep_going_attempts_remaining_units() {
        let root = suite_fixture();
        let (driver, invoker) = driver(
            &root,
            RecordingInvoker {
                fail_units: vec!["lock_chains"],
                ..Default::default()
            },
        );
        let driver = driver.with_keep_going(true);

        let report = driver.execute(Verb::Run).unwrap();
        let seen = invoker.seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 6);

        // The aggregate still fails, naming the first failing unit
        assert!(!report.success());
        assert_eq!(report.first_failure().unwrap().unit, "lock_chains");
        assert_eq!(report.stats.failed, 1);
        assert_eq!(report.stats.passed, 5);
    }

    #[test]
    fn test_execute_aborts_on_interrupt_even_with_keep_going() {
        let root = suite_fixture();
        let (driver, invoker) = driver(
            &root,
            RecordingInvoker {
                signal_units: vec!["event_throughput"],
                ..Default::default()
            },
        );
        let driver = driver.with_keep_going(true);

        let err = driver.execute(Verb::Run).unwrap_err();
        assert!(matches!(err, DriverError::Interrupted { .. }));

        let seen = invoker.seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 2, "remaining queue must be abandoned");
    }

    #[test]
    fn test_execute_dry_run_spawns_nothing() {
        let root = suite_fixture();
        let (driver, invoker) = driver(&root, RecordingInvoker::default());
        let driver = driver.with_dry_run(true);

        let report = driver.execute(Verb::Clean).unwrap();
        assert!(invoker.seen.lock().unwrap().is_empty());
        assert_eq!(report.units.len(), 6);
        assert!(report
            .units
            .iter()
            .all(|u| u.status == UnitStatus::Planned));
        assert_eq!(report.stats.attempted, 0);
    }

    #[test]
    fn test_execute_missing_unit_dir_is_fatal() {
        let root = suite_fixture();
        fs::remove_dir(root.path().join("reducetest")).unwrap();
        let (driver, invoker) = driver(&root, RecordingInvoker::default());

        let err = driver.execute(Verb::Run).unwrap_err();
        match err {
            DriverError::UnitDirMissing { unit, .. } => assert_eq!(unit, "reducetest"),
            other => panic!("unexpected error: {other}"),
        }

        // The four units before reducetest ran; nothing after it did
        let seen = invoker.seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_new_rejects_relative_runtime_dir() {
        let err = SuiteDriver::new("/suite", "relative/runtime").unwrap_err();
        assert!(matches!(err, DriverError::RuntimeDirNotAbsolute { .. }));
    }
}
