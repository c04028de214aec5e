//! CLI module for vbsyn
//!
//! ## Commands
//!
//! - `check <files...>` - Parse files and report every syntax error
//! - `outline <file>` - Print namespaces, types and member headers (bodies are skipped)
//! - `dump <file>` - Print the AST as S-expressions
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    /// At least one file has syntax errors.
    pub const SYNTAX_ERRORS: ExitCode = ExitCode(1);
    /// The CLI itself failed (unreadable file, bad arguments).
    pub const FAILURE: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// The CLI entry point catches these errors, prints the message, and exits with the code.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Cannot access file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Source file '{path}' is too large ({size} bytes, max {max} bytes)")]
    TooLarge { path: PathBuf, size: u64, max: u64 },
    #[error("Error parsing '{path}': {message}")]
    Parse { path: PathBuf, message: String },
    #[error("Error writing output: {0}")]
    Output(String),
}

impl CliError {
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::FAILURE
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Error-tolerant Visual Basic syntax checker
#[derive(Parser, Debug)]
#[command(name = "vbsyn")]
#[command(version = VERSION)]
#[command(about = "Error-tolerant Visual Basic syntax checker", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable reports with source context
    #[default]
    Text,
    /// One JSON document per invocation
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse files and report every syntax error
    Check {
        /// Source files to check
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
        /// Treat each file as a bare statement list or expression
        #[arg(long)]
        snippet: bool,
        /// Skip member bodies
        #[arg(long)]
        outline: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Number of files parsed in parallel (default: available cores)
        #[arg(short, long, value_name = "N")]
        jobs: Option<usize>,
    },

    /// Print namespaces, types and member headers
    Outline {
        /// Source file
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the syntax tree
    Dump {
        /// Source file
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Treat the file as a bare statement list or expression
        #[arg(long)]
        snippet: bool,
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
            eprintln!("{e}");
            process::exit(e.exit_code().0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Check {
            files,
            snippet,
            outline,
            format,
            jobs,
        } => {
            let options = commands::CheckOptions {
                snippet,
                outline,
                format,
                jobs,
            };
            commands::check_files(&files, &options)
        }
        Command::Outline { file, format } => commands::outline_file(&file, format),
        Command::Dump { file, snippet } => commands::dump_file(&file, snippet),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::try_parse_from(["vbsyn", "check", "a.vb", "b.vb", "--jobs", "2"]).unwrap();
        if let Command::Check { files, jobs, format, .. } = cli.command {
            assert_eq!(files.len(), 2);
            assert_eq!(jobs, Some(2));
            assert_eq!(format, OutputFormat::Text);
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_cli_check_requires_a_file() {
        assert!(Cli::try_parse_from(["vbsyn", "check"]).is_err());
    }

    #[test]
    fn test_cli_parse_json_format() {
        let cli = Cli::try_parse_from(["vbsyn", "check", "--format", "json", "a.vb"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Check {
                format: OutputFormat::Json,
                ..
            }
        ));
    }

    #[test]
    fn test_cli_parse_outline_and_dump() {
        let cli = Cli::try_parse_from(["vbsyn", "outline", "a.vb"]).unwrap();
        assert!(matches!(cli.command, Command::Outline { .. }));

        let cli = Cli::try_parse_from(["vbsyn", "dump", "--snippet", "a.vb"]).unwrap();
        if let Command::Dump { snippet, .. } = cli.command {
            assert!(snippet);
        } else {
            panic!("Expected Dump command");
        }
    }
}
