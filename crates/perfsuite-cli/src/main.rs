use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use perfsuite_driver::Verb;
use std::io;
use std::path::PathBuf;

mod commands;
mod config;

/// Microbenchmark suite driver.
///
/// Perfsuite drives a fixed suite of concurrent-runtime microbenchmarks
/// (event_latency, event_throughput, lock_chains, lock_contention,
/// reducetest, task_throughput). Each benchmark carries its own build
/// description; perfsuite invokes the build tool inside every benchmark
/// directory, one at a time, in a fixed order.
///
/// Invoked without a subcommand, perfsuite runs the whole suite.
///
/// EXAMPLES:
///     perfsuite --runtime-dir ../runtime        Run every benchmark
///     perfsuite build -r ../runtime             Build without running
///     perfsuite clean -r ../runtime             Clean every benchmark
///     perfsuite run --dry-run -r ../runtime     Show planned invocations
///     perfsuite list                            Show the benchmark table
///
/// ENVIRONMENT VARIABLES:
///     PERFSUITE_RUNTIME_DIR   Runtime directory (overridden by --runtime-dir)
///     PERFSUITE_TOOL          Build tool program (default: make)
///     PERFSUITE_KEEP_GOING    Attempt remaining benchmarks after a failure
///     PERFSUITE_JSON          Set to '1' for JSON output by default
///     NO_COLOR                Set to disable colored output
#[derive(Parser)]
#[command(name = "perfsuite")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    flags: SuiteFlags,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Flags shared by every verb
#[derive(clap::Args, Clone)]
struct SuiteFlags {
    /// Suite root containing the benchmark directories
    #[arg(long, global = true, default_value = ".", value_name = "DIR")]
    suite_root: PathBuf,

    /// Runtime directory propagated to every benchmark build
    #[arg(long, short = 'r', global = true, value_name = "DIR")]
    runtime_dir: Option<PathBuf>,

    /// Path to a configuration file (default: discovered perfsuite.toml)
    #[arg(long, short = 'C', global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Build tool program invoked inside each benchmark directory
    #[arg(long, global = true, value_name = "PROGRAM")]
    tool: Option<String>,

    /// Attempt the remaining benchmarks after a failure
    #[arg(long, short = 'k', global = true)]
    keep_going: bool,

    /// Print planned invocations without running anything
    #[arg(long, global = true)]
    dry_run: bool,

    /// Verbose output with timing and command lines
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Quiet output (errors only)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Output the suite summary as JSON
    #[arg(long, global = true, env = "PERFSUITE_JSON")]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every benchmark (default)
    ///
    /// Builds and executes each benchmark in turn, strictly one at a
    /// time, stopping at the first failure unless --keep-going is given.
    ///
    /// EXAMPLES:
    ///     perfsuite run -r ../runtime           Run the whole suite
    ///     perfsuite run -r ../runtime -k        Keep going past failures
    #[command(visible_aliases = ["r", "all"])]
    Run,

    /// Build every benchmark without running it
    ///
    /// EXAMPLES:
    ///     perfsuite build -r ../runtime         Build the whole suite
    #[command(visible_alias = "b")]
    Build,

    /// Remove build products of every benchmark
    ///
    /// EXAMPLES:
    ///     perfsuite clean -r ../runtime         Clean the whole suite
    Clean,

    /// Show the benchmark table and which directories are present
    ///
    /// EXAMPLES:
    ///     perfsuite list                        Human-readable table
    ///     perfsuite list --json                 Machine-readable listing
    #[command(visible_alias = "ls")]
    List,

    /// Generate shell completions
    ///
    /// EXAMPLES:
    ///     perfsuite completions bash > ~/.bash_completions/perfsuite.bash
    ///     perfsuite completions zsh > ~/.zfunc/_perfsuite
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cli_config = config::Config::from_env();

    if cli_config.no_color {
        colored::control::set_override(false);
    }

    let suite_args = commands::suite::SuiteArgs {
        suite_root: cli.flags.suite_root.clone(),
        runtime_dir: cli.flags.runtime_dir.clone(),
        config_path: cli.flags.config.clone(),
        tool: cli.flags.tool.clone(),
        keep_going: cli.flags.keep_going,
        dry_run: cli.flags.dry_run,
        verbose: cli.flags.verbose,
        quiet: cli.flags.quiet,
        json: cli.flags.json,
    };

    match cli.command {
        None | Some(Commands::Run) => commands::suite::run(Verb::Run, suite_args)?,
        Some(Commands::Build) => commands::suite::run(Verb::Build, suite_args)?,
        Some(Commands::Clean) => commands::suite::run(Verb::Clean, suite_args)?,
        Some(Commands::List) => {
            let args = commands::list::ListArgs {
                suite_root: cli.flags.suite_root,
                json: cli.flags.json,
            };
            commands::list::run(args)?;
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
    }

    Ok(())
}
