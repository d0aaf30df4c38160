//! List command - show the benchmark table and directory presence

use anyhow::Result;
use colored::Colorize;
use perfsuite_driver::Suite;
use std::path::PathBuf;

/// List command arguments
#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    /// Suite root containing the benchmark directories
    pub suite_root: PathBuf,
    /// JSON output
    pub json: bool,
}

/// Run the list command
pub fn run(args: ListArgs) -> Result<()> {
    let suite = Suite::standard();
    let scan = suite.scan(&args.suite_root);

    if args.json {
        println!(
            "{}",
            serde_json::json!({
                "suite_root": args.suite_root.display().to_string(),
                "units": scan.iter().map(|p| {
                    serde_json::json!({
                        "name": p.unit.name,
                        "dir": p.dir.display().to_string(),
                        "present": p.present,
                        "has_build_file": p.has_build_file,
                    })
                }).collect::<Vec<_>>(),
            })
        );
        return Ok(());
    }

    println!("Benchmark units in {}:", args.suite_root.display());
    for presence in &scan {
        let status = if !presence.present {
            "missing".red()
        } else if !presence.has_build_file {
            "no Makefile".yellow()
        } else {
            "present".green()
        };
        println!("  {:<20} {}", presence.unit.name, status);
    }

    Ok(())
}
