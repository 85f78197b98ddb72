//! Command-line interface for the framelog demo binary.
use clap::{Parser, Subcommand, ValueEnum};

use crate::logging::Severity;

/// Top-level CLI entry point for the framelog demo binary.
#[derive(Parser, Debug)]
#[command(
    name = "framelog",
    about = "Write boxed, caller-aware log frames",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Show framelog's own diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Emit one framed message
    Emit(EmitOpts),
    /// Print version information
    Version,
}

/// Severity names accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelArg {
    /// Most detailed output
    Verbose,
    /// Debugging output (written like verbose)
    Debug,
    /// Informational output
    Info,
    /// Recoverable problems
    Warn,
    /// Failures
    Error,
}

impl From<LevelArg> for Severity {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Verbose => Self::Verbose,
            LevelArg::Debug => Self::Debug,
            LevelArg::Info => Self::Info,
            LevelArg::Warn => Self::Warn,
            LevelArg::Error => Self::Error,
        }
    }
}

/// Options for the `emit` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct EmitOpts {
    /// Message to frame
    pub message: String,

    /// Severity of the frame
    #[arg(short, long, value_enum, default_value_t = LevelArg::Info)]
    pub level: LevelArg,

    /// Raw numeric level (1 verbose .. 5 error); unknown values log as verbose
    #[arg(long, conflicts_with = "level")]
    pub raw_level: Option<u8>,

    /// Tag for this frame (defaults to the configured tag)
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Omit the thread-name block
    #[arg(long)]
    pub no_thread: bool,

    /// Omit the caller-location block
    #[arg(long)]
    pub no_caller: bool,

    /// Load settings from a TOML file
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Send lines through tracing instead of writing them to stderr directly
    #[arg(long)]
    pub tracing: bool,
}
