//! Process runner for signtool
//!
//! Resolves the binary once, assembles the final command line (global
//! modifiers, compatibility layer), spawns a single child process and turns
//! its exit status into a [`ToolOutput`] or an [`ExecutionError`].

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

use crate::error::{AuthsignError, ExecutionError, Result};
use crate::flags::{build_args, redacted, FlagTable};
use crate::locator::{BundledLocator, ToolLocator};
use crate::options::{CatdbOptions, SignOptions, TimestampOptions, VerifyOptions};
use crate::target::Target;

/// Program used to run signtool on hosts other than Windows
pub const DEFAULT_COMPAT_PROGRAM: &str = "wine";

/// What to do with the child's standard streams
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StdioMode {
    /// Capture stdout and stderr
    #[default]
    Piped,
    /// Share the parent's streams; nothing is captured
    Inherit,
    /// Discard everything
    Null,
}

impl StdioMode {
    fn output(self) -> Stdio {
        match self {
            Self::Piped => Stdio::piped(),
            Self::Inherit => Stdio::inherit(),
            Self::Null => Stdio::null(),
        }
    }

    fn input(self) -> Stdio {
        match self {
            Self::Inherit => Stdio::inherit(),
            Self::Piped | Self::Null => Stdio::null(),
        }
    }
}

impl std::str::FromStr for StdioMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "piped" | "pipe" => Ok(Self::Piped),
            "inherit" => Ok(Self::Inherit),
            "null" | "ignore" => Ok(Self::Null),
            _ => Err(format!("Unknown stdio mode: {}", s)),
        }
    }
}

/// Process-level controls for a single run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunOptions {
    /// Working directory of the child
    pub cwd: Option<PathBuf>,
    /// Stream handling, piped when unset
    pub stdio: Option<StdioMode>,
    /// Pass `/debug`
    pub debug: bool,
    /// Pass `/v`
    pub verbose: bool,
    /// Pass `/q`
    pub quiet: bool,
}

impl RunOptions {
    /// Global modifier tokens in insertion order
    fn global_flags(&self) -> Vec<&'static str> {
        let mut flags = Vec::new();
        if self.quiet {
            flags.push("/q");
        }
        if self.verbose {
            flags.push("/v");
        }
        if self.debug {
            flags.push("/debug");
        }
        flags
    }
}

/// Whether signtool can be executed directly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPlatform {
    /// signtool runs natively
    Windows,
    /// signtool runs through the compatibility layer
    Foreign,
}

impl HostPlatform {
    /// Platform of the running process
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Foreign
        }
    }
}

/// Output of a successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolOutput {
    /// Always 0
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// The exact program and arguments that will be spawned
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandLine {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Copy with the password masked, for printing
    pub fn redacted(&self) -> Self {
        Self {
            program: self.program.clone(),
            args: redacted(&self.args),
        }
    }

    /// Shell-like rendering with the password masked
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.to_string_lossy().into_owned()];
        parts.extend(redacted(&self.args).into_iter().map(|arg| {
            if arg.contains(' ') {
                format!("\"{}\"", arg)
            } else {
                arg
            }
        }));
        parts.join(" ")
    }
}

/// Runs signtool with a memoized binary path
#[derive(Debug)]
pub struct SignTool {
    locator: Box<dyn ToolLocator>,
    resolved: OnceLock<PathBuf>,
    host: HostPlatform,
    compat_program: PathBuf,
}

impl SignTool {
    /// Create a runner for the current host
    pub fn new(locator: impl ToolLocator + 'static) -> Self {
        Self {
            locator: Box::new(locator),
            resolved: OnceLock::new(),
            host: HostPlatform::current(),
            compat_program: PathBuf::from(DEFAULT_COMPAT_PROGRAM),
        }
    }

    /// Override host detection
    pub fn with_host(mut self, host: HostPlatform) -> Self {
        self.host = host;
        self
    }

    /// Override the compatibility layer program
    pub fn with_compat_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.compat_program = program.into();
        self
    }

    /// Host this runner targets
    pub fn host(&self) -> HostPlatform {
        self.host
    }

    /// Program used to run signtool on a foreign host
    pub fn compat_program(&self) -> &Path {
        &self.compat_program
    }

    /// Resolve the binary path, asking the locator only until it first succeeds.
    ///
    /// Concurrent first calls may both consult the locator; whichever result is
    /// stored first wins and is returned to everyone afterwards.
    pub fn resolve(&self) -> Result<PathBuf> {
        if let Some(path) = self.resolved.get() {
            return Ok(path.clone());
        }
        let path = self.locator.locate()?;
        Ok(self.resolved.get_or_init(|| path).clone())
    }

    /// Build the final command line for `args` without spawning anything
    pub fn command_line(&self, mut args: Vec<String>, run: &RunOptions) -> Result<CommandLine> {
        let binary = self.resolve()?;

        let insert_at = args.len().min(1);
        for (offset, flag) in run.global_flags().into_iter().enumerate() {
            args.insert(insert_at + offset, flag.to_string());
        }

        let program = match self.host {
            HostPlatform::Windows => binary,
            HostPlatform::Foreign => {
                args.insert(0, binary.to_string_lossy().into_owned());
                self.compat_program.clone()
            }
        };

        Ok(CommandLine { program, args })
    }

    /// Spawn signtool with `args` and wait for it to exit
    #[instrument(skip_all, fields(operation = args.first().map(String::as_str).unwrap_or("")))]
    pub async fn run(&self, args: Vec<String>, run: &RunOptions) -> Result<ToolOutput> {
        let operation = args.first().cloned().unwrap_or_default();
        let line = self.command_line(args, run)?;
        debug!(
            program = %line.program.display(),
            args = ?redacted(&line.args),
            "spawning signtool"
        );

        let stdio = run.stdio.unwrap_or_default();
        let mut cmd = Command::new(&line.program);
        cmd.args(&line.args)
            .stdin(stdio.input())
            .stdout(stdio.output())
            .stderr(stdio.output());
        if let Some(cwd) = &run.cwd {
            cmd.current_dir(cwd);
        }

        let child = cmd.spawn().map_err(AuthsignError::Spawn)?;
        let output = child.wait_with_output().await.map_err(AuthsignError::Spawn)?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        match output.status.code() {
            Some(0) => {
                info!(operation = %operation, "signtool completed");
                Ok(ToolOutput {
                    code: 0,
                    stdout,
                    stderr,
                })
            }
            code => {
                warn!(operation = %operation, code = ?code, "signtool failed");
                Err(ExecutionError::new(
                    &operation,
                    line.program,
                    line.args,
                    code,
                    stdout,
                    stderr,
                )
                .into())
            }
        }
    }

    /// Build arguments for any options record and run them
    pub async fn execute<O: FlagTable>(
        &self,
        target: &Target,
        options: &O,
        run: &RunOptions,
    ) -> Result<ToolOutput> {
        self.run(build_args(options, target), run).await
    }

    /// Digitally sign files
    pub async fn sign(
        &self,
        target: &Target,
        options: &SignOptions,
        run: &RunOptions,
    ) -> Result<ToolOutput> {
        self.execute(target, options, run).await
    }

    /// Verify the digital signature of files
    pub async fn verify(
        &self,
        target: &Target,
        options: &VerifyOptions,
        run: &RunOptions,
    ) -> Result<ToolOutput> {
        self.execute(target, options, run).await
    }

    /// Time stamp files
    pub async fn timestamp(
        &self,
        target: &Target,
        options: &TimestampOptions,
        run: &RunOptions,
    ) -> Result<ToolOutput> {
        self.execute(target, options, run).await
    }

    /// Add or remove catalog files in a catalog database
    pub async fn catalog_edit(
        &self,
        target: &Target,
        options: &CatdbOptions,
        run: &RunOptions,
    ) -> Result<ToolOutput> {
        self.execute(target, options, run).await
    }
}

/// Process-wide runner using [`BundledLocator::from_env`]
pub fn default_tool() -> &'static SignTool {
    static TOOL: OnceLock<SignTool> = OnceLock::new();
    TOOL.get_or_init(|| SignTool::new(BundledLocator::from_env()))
}

/// Digitally sign files with the default runner
pub async fn sign(target: &Target, options: &SignOptions, run: &RunOptions) -> Result<ToolOutput> {
    default_tool().sign(target, options, run).await
}

/// Verify signatures with the default runner
pub async fn verify(
    target: &Target,
    options: &VerifyOptions,
    run: &RunOptions,
) -> Result<ToolOutput> {
    default_tool().verify(target, options, run).await
}

/// Time stamp files with the default runner
pub async fn timestamp(
    target: &Target,
    options: &TimestampOptions,
    run: &RunOptions,
) -> Result<ToolOutput> {
    default_tool().timestamp(target, options, run).await
}

/// Edit a catalog database with the default runner
pub async fn catalog_edit(
    target: &Target,
    options: &CatdbOptions,
    run: &RunOptions,
) -> Result<ToolOutput> {
    default_tool().catalog_edit(target, options, run).await
}
