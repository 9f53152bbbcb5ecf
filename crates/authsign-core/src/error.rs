//! Error types for signtool invocations

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for authsign operations
pub type Result<T> = std::result::Result<T, AuthsignError>;

/// Errors produced while resolving, spawning or running signtool
#[derive(Debug, Error)]
pub enum AuthsignError {
    /// No bundled signtool variant exists for this processor architecture
    #[error("Signtool is not supported in this environment (architecture: {arch})")]
    UnsupportedArchitecture { arch: String },

    /// The operating system could not start the process
    #[error(transparent)]
    Spawn(std::io::Error),

    /// The process ran and exited with a nonzero status
    #[error(transparent)]
    Execution(#[from] ExecutionError),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Unrecognized operation name
    #[error("Unknown signtool operation: {0}")]
    UnknownOperation(String),
}

/// A signtool run that exited with a failure status.
///
/// Carries everything needed to diagnose the failure: the program that was
/// actually spawned, the full argument list, the exit code and both captured
/// output streams.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ExecutionError {
    /// Human readable summary, followed by stderr when it is non-empty
    pub message: String,
    /// Program that was spawned (signtool itself or the compatibility layer)
    pub command: PathBuf,
    /// Arguments passed to `command`
    pub args: Vec<String>,
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl ExecutionError {
    /// Build the error for a finished process, appending stderr to the message.
    pub fn new(
        operation: &str,
        command: PathBuf,
        args: Vec<String>,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    ) -> Self {
        let mut message = match code {
            Some(code) => format!("SignTool {} command exited with code {}", operation, code),
            None => format!("SignTool {} command was terminated by a signal", operation),
        };
        if !stderr.is_empty() {
            message.push('\n');
            message.push_str(&stderr);
        }

        Self {
            message,
            command,
            args,
            code,
            stdout,
            stderr,
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuthsignError {
    /// Exit code reported by the tool, if this is an execution failure
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Execution(err) => err.code,
            _ => None,
        }
    }
}
