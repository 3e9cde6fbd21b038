//! CLI module for the lox test harness
//!
//! ## Commands
//!
//! - `check` - run the arithmetic catalogue against the interpreter
//! - `run [SCRIPT]` - invoke one script and print the raw result
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod runner;

use std::fmt;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::harness::invoker::Invoker;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Script the bare `run` subcommand falls back to, for ad-hoc inspection.
const DEFAULT_RUN_SCRIPT: &str = "tests/testArithmatic/test_negate.lox";

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Black-box test harness for the lox interpreter executable
#[derive(Parser, Debug)]
#[command(name = "loxcheck")]
#[command(version = VERSION)]
#[command(about = "Black-box test harness for the lox interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Project root holding the `lox` binary and the test scripts
    /// (default: $LOX_ROOT, else this crate's directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Kill the interpreter if a single invocation exceeds this many seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the arithmetic test catalogue
    Check {
        /// Verbose output (per-case timing)
        #[arg(short, long)]
        verbose: bool,
        /// Stop on first failure
        #[arg(short = 'x', long = "exitfirst")]
        stop_on_fail: bool,
        /// Filter cases by keyword
        #[arg(short = 'k', value_name = "EXPR")]
        filter: Option<String>,
    },

    /// Invoke one script and print the raw result
    Run {
        /// Script path relative to the project root
        #[arg(value_name = "SCRIPT", default_value = DEFAULT_RUN_SCRIPT)]
        script: String,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let invoker = build_invoker(cli.root, cli.timeout);

    match cli.command {
        Command::Check {
            verbose,
            stop_on_fail,
            filter,
        } => runner::run_catalogue(&invoker, verbose, stop_on_fail, filter.as_deref()),
        Command::Run { script } => run_script(&invoker, &script),
    }
}

/// Assemble the invoker from flags and environment.
fn build_invoker(root: Option<PathBuf>, timeout: Option<f64>) -> Invoker {
    let invoker = match root {
        Some(root) => Invoker::new(root),
        None => Invoker::from_env(),
    };
    match timeout {
        Some(secs) => invoker.with_timeout(Duration::from_secs_f64(secs)),
        None => invoker,
    }
}

/// Manual-run mode: print the interpreter's raw output for one script.
fn run_script(invoker: &Invoker, script: &str) -> CliResult<ExitCode> {
    match invoker.invoke(script) {
        Ok(stdout) => {
            print!("{}", stdout);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Err(CliError::failure(e.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================
