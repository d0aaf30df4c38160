//! Suite orchestration for the perfsuite microbenchmark driver
//!
//! Provides the sequential driver behind the `perfsuite` binary:
//! - Fixed, declaration-ordered benchmark unit set
//! - Verb to sub-target mapping (run / build / clean)
//! - One external build-tool sub-invocation per unit, strictly serialized
//! - Fail-fast failure propagation with an explicit keep-going opt-in
//! - Per-unit and suite-level reporting

pub mod driver;
pub mod error;
pub mod invoke;
pub mod report;
pub mod suite;
pub mod verb;

// Re-export main types
pub use driver::{DriverConfig, SuiteDriver};
pub use error::{DriverError, DriverResult};
pub use invoke::{
    Invocation, InvokeOutcome, ProcessInvoker, ToolInvoker, DEFAULT_TOOL, RUNTIME_DIR_VAR,
};
pub use report::{OutputMode, SuiteReport, SuiteStats, UnitReport, UnitStatus};
pub use suite::{Suite, Unit, UnitPresence, UNIT_NAMES};
pub use verb::Verb;
