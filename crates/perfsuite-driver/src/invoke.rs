//! Sub-invocation of the per-unit build tool
//!
//! Each unit gets exactly one child process per verb: the external build
//! tool, started in the unit's own directory, given the verb's sub-target
//! and the absolute runtime directory. The child's build logic is opaque;
//! only its exit status is interpreted.

use crate::error::{DriverError, DriverResult};
use crate::suite::Unit;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Default external build tool
pub const DEFAULT_TOOL: &str = "make";

/// Variable name under which the runtime directory is propagated
pub const RUNTIME_DIR_VAR: &str = "RUNTIME_DIR";

/// A planned sub-invocation for one unit
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Unit being driven
    pub unit: Unit,
    /// Working directory for the child (the unit's subdirectory)
    pub dir: PathBuf,
    /// Sub-target name for the build tool
    pub subtarget: &'static str,
    /// Absolute runtime directory, identical for every unit of one run
    pub runtime_dir: PathBuf,
}

impl Invocation {
    /// Command-line arguments handed to the build tool
    ///
    /// The runtime directory rides along as a `VAR=value` override so
    /// make-style tools treat it as a variable assignment.
    pub fn args(&self) -> Vec<String> {
        vec![
            self.subtarget.to_string(),
            format!("{}={}", RUNTIME_DIR_VAR, self.runtime_dir.display()),
        ]
    }

    /// Environment variables for the child, for tools that read the
    /// runtime directory from the environment instead of an override.
    pub fn environment(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();
        env.insert(
            RUNTIME_DIR_VAR.to_string(),
            self.runtime_dir.display().to_string(),
        );
        env
    }

    /// Render the full command line for display (verbose and dry-run output)
    pub fn render(&self, tool: &str) -> String {
        format!(
            "{} {} (in {})",
            tool,
            self.args().join(" "),
            self.dir.display()
        )
    }
}

/// Outcome of one sub-invocation
#[derive(Debug)]
pub struct InvokeOutcome {
    /// Child exit code; `None` means the child was killed by a signal
    pub exit_code: Option<i32>,
    /// Captured stdout
    pub stdout: String,
    /// Captured stderr
    pub stderr: String,
    /// Wall-clock time spent waiting on the child
    pub elapsed: Duration,
}

impl InvokeOutcome {
    /// Check if the sub-invocation succeeded
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Check if the child was terminated by a signal
    pub fn interrupted(&self) -> bool {
        self.exit_code.is_none()
    }
}

/// Executes one sub-invocation and reports its outcome
///
/// The seam exists so the sequential driver can be exercised against an
/// instrumented stub without spawning real processes.
pub trait ToolInvoker {
    fn invoke(&self, invocation: &Invocation) -> DriverResult<InvokeOutcome>;
}

/// Invoker that spawns the external build tool as a child process
pub struct ProcessInvoker {
    /// Build tool program name or path
    tool: String,
    /// Suppress echo of the child's stdout
    quiet: bool,
}

impl ProcessInvoker {
    /// Create a new process invoker for the given tool
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            quiet: false,
        }
    }

    /// Suppress echo of child stdout
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Tool program name
    pub fn tool(&self) -> &str {
        &self.tool
    }
}

impl ToolInvoker for ProcessInvoker {
    fn invoke(&self, invocation: &Invocation) -> DriverResult<InvokeOutcome> {
        let start = Instant::now();

        let output = Command::new(&self.tool)
            .args(invocation.args())
            .current_dir(&invocation.dir)
            .envs(invocation.environment())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| DriverError::spawn(invocation.unit.name, &self.tool, e))?
            .wait_with_output()
            .map_err(|e| DriverError::spawn(invocation.unit.name, &self.tool, e))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !self.quiet && !stdout.is_empty() {
            print!("{}", stdout);
        }
        if !stderr.is_empty() {
            eprint!("{}", stderr);
        }

        Ok(InvokeOutcome {
            exit_code: output.status.code(),
            stdout,
            stderr,
            elapsed: start.elapsed(),
        })
    }
}
