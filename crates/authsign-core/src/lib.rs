//! Authsign Core - drive the Windows `signtool` utility from typed options
//!
//! This crate translates option records into signtool command lines and runs
//! them as a child process:
//! - `flags`/`options`: table-driven argument building for sign, verify,
//!   timestamp and catdb
//! - `runner`: spawning signtool (directly or through a compatibility layer)
//!   and collecting its output
//! - `locator`: pluggable resolution of the signtool binary
//! - `config`: optional `authsign.toml` / `authsign.yaml` configuration

pub mod config;
pub mod error;
pub mod flags;
pub mod locator;
pub mod operation;
pub mod options;
pub mod runner;
pub mod target;

pub use config::{load_config, load_config_or_default, Config};
pub use error::{AuthsignError, ConfigError, ExecutionError, Result};
pub use flags::{build_args, Arity, FlagRow, FlagSpec, FlagTable};
pub use locator::{Architecture, BundledLocator, FixedLocator, SearchPathLocator, ToolLocator};
pub use operation::Operation;
pub use options::{CatdbOptions, DigestSource, SignOptions, TimestampOptions, VerifyOptions};
pub use runner::{
    catalog_edit, default_tool, sign, timestamp, verify, CommandLine, HostPlatform, RunOptions,
    SignTool, StdioMode, ToolOutput,
};
pub use target::Target;
