//! Suite command - drive every benchmark through one verb

use anyhow::{Context, Result};
use colored::Colorize;
use perfsuite_config::{resolve_runtime_dir, ConfigLoader};
use perfsuite_driver::{OutputMode, SuiteDriver, SuiteReport, UnitStatus, Verb};
use std::path::PathBuf;

/// Suite command arguments
#[derive(Debug, Clone, Default)]
pub struct SuiteArgs {
    /// Suite root containing the benchmark directories
    pub suite_root: PathBuf,
    /// Runtime directory override from the command line
    pub runtime_dir: Option<PathBuf>,
    /// Explicit configuration file
    pub config_path: Option<PathBuf>,
    /// Build tool override from the command line
    pub tool: Option<String>,
    /// Attempt remaining benchmarks after a failure
    pub keep_going: bool,
    /// Print planned invocations without running anything
    pub dry_run: bool,
    /// Verbose output
    pub verbose: bool,
    /// Quiet output (errors only)
    pub quiet: bool,
    /// JSON output
    pub json: bool,
}

/// Run the suite command for one verb
pub fn run(verb: Verb, args: SuiteArgs) -> Result<()> {
    let mut loader = ConfigLoader::new();
    let file_config = match &args.config_path {
        Some(path) => loader
            .load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => loader
            .load_from_directory(&args.suite_root)
            .context("Failed to load configuration")?,
    };

    // The one normalization step: the runtime directory is resolved to an
    // absolute path here, before any benchmark runs, and never again.
    let configured = args
        .runtime_dir
        .as_deref()
        .or_else(|| file_config.runtime_dir());
    let runtime_dir = resolve_runtime_dir(configured)?;

    let tool = args
        .tool
        .clone()
        .unwrap_or_else(|| file_config.tool().to_string());
    let keep_going = args.keep_going || file_config.keep_going();
    let output_mode = determine_output_mode(&args);

    let driver = SuiteDriver::new(&args.suite_root, &runtime_dir)?
        .with_tool(&tool)
        .with_keep_going(keep_going)
        .with_dry_run(args.dry_run)
        .with_verbose(output_mode == OutputMode::Verbose)
        .with_quiet(matches!(output_mode, OutputMode::Quiet | OutputMode::Json));

    let report = driver.execute(verb)?;

    match output_mode {
        OutputMode::Json => print_json_summary(&report, &tool),
        OutputMode::Quiet => {}
        OutputMode::Normal | OutputMode::Verbose => print_summary(&report),
    }

    report.to_result()?;
    Ok(())
}

/// Determine output mode from arguments
fn determine_output_mode(args: &SuiteArgs) -> OutputMode {
    if args.json {
        OutputMode::Json
    } else if args.quiet {
        OutputMode::Quiet
    } else if args.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    }
}

/// Human-readable closing summary
fn print_summary(report: &SuiteReport) {
    println!("\n{}", "=".repeat(60));
    if report.dry_run {
        println!(
            "Dry run: {} sub-invocations planned for '{}'",
            report.units.len(),
            report.verb
        );
    } else if report.success() {
        println!(
            "Suite {} succeeded in {:.2}s",
            report.verb,
            report.stats.total_time.as_secs_f64()
        );
    } else {
        println!(
            "Suite {} failed in {:.2}s",
            report.verb,
            report.stats.total_time.as_secs_f64()
        );
    }
    println!("{}", "=".repeat(60));
    println!("  Runtime dir: {}", report.runtime_dir.display());

    for unit in &report.units {
        let status = match unit.status {
            UnitStatus::Passed => "ok".green(),
            UnitStatus::Failed => "FAILED".red(),
            UnitStatus::Planned => "planned".yellow(),
        };
        if report.dry_run {
            println!("  {:<20} {}", unit.unit, status);
        } else {
            println!(
                "  {:<20} {} ({:.2}s)",
                unit.unit,
                status,
                unit.duration.as_secs_f64()
            );
        }
    }

    if !report.dry_run {
        println!(
            "  Units: {} passed, {} failed, {} of {} attempted",
            report.stats.passed,
            report.stats.failed,
            report.stats.attempted,
            report.stats.total_units
        );
    }
    println!("{}", "=".repeat(60));
}

/// Machine-readable summary, one JSON document on stdout
fn print_json_summary(report: &SuiteReport, tool: &str) {
    println!(
        "{}",
        serde_json::json!({
            "success": report.success(),
            "verb": report.verb.name(),
            "subtarget": report.verb.subtarget(),
            "tool": tool,
            "runtime_dir": report.runtime_dir.display().to_string(),
            "dry_run": report.dry_run,
            "total_time": report.stats.total_time.as_secs_f64(),
            "attempted": report.stats.attempted,
            "passed": report.stats.passed,
            "failed": report.stats.failed,
            "units": report.units.iter().map(|u| {
                serde_json::json!({
                    "name": u.unit,
                    "subtarget": u.subtarget,
                    "status": u.status.name(),
                    "exit_code": u.exit_code,
                    "duration": u.duration.as_secs_f64(),
                })
            }).collect::<Vec<_>>(),
        })
    );
}
