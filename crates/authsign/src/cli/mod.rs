//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::PathBuf;

use authsign_core::StdioMode;
use clap::{Parser, Subcommand};

use commands::{CatdbCommand, FlagsCommand, SignCommand, TimestampCommand, VerifyCommand};

/// Authsign - drive signtool from the command line or a config file
#[derive(Debug, Parser)]
#[command(name = "authsign")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity; also passes /v to signtool
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output except errors; also passes /q to signtool
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Pass /debug to signtool
    #[arg(long, global = true)]
    pub debug: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory for signtool
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Configuration file (default: search for authsign.toml / authsign.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the command line instead of running it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Stream handling for signtool (piped, inherit, null)
    #[arg(long, global = true)]
    pub stdio: Option<StdioMode>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Digitally sign files
    Sign(SignCommand),

    /// Verify the signature of files
    Verify(VerifyCommand),

    /// Time stamp signed files
    Timestamp(TimestampCommand),

    /// Add or remove catalog files in a catalog database
    Catdb(CatdbCommand),

    /// Show the option-to-flag table of an operation
    Flags(FlagsCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self) -> anyhow::Result<()> {
        match &self.command {
            Commands::Sign(cmd) => cmd.execute(self),
            Commands::Verify(cmd) => cmd.execute(self),
            Commands::Timestamp(cmd) => cmd.execute(self),
            Commands::Catdb(cmd) => cmd.execute(self),
            Commands::Flags(cmd) => cmd.execute(self),
        }
    }

    /// Console log level implied by -q / -v
    pub fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "error",
            (_, 0) => "warn",
            (_, 1) => "info",
            (_, _) => "debug",
        }
    }
}
