//! Resolution of the signtool binary path
//!
//! The runner asks a [`ToolLocator`] for the binary exactly once and caches
//! the answer, so locators only need to be correct, not cheap.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{AuthsignError, Result};

/// Environment variable overriding the bundled signtool root
pub const ROOT_ENV: &str = "AUTHSIGN_ROOT";

/// File name of the bundled binary
pub const BINARY_NAME: &str = "signtool.exe";

/// Processor architecture, as far as bundled binaries are concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Architecture {
    /// 32-bit x86
    X86,
    /// 64-bit x86
    X64,
    /// Anything without a bundled binary
    Other(String),
}

impl Architecture {
    /// Architecture of the running process
    pub fn current() -> Self {
        Self::from_rust_arch(std::env::consts::ARCH)
    }

    /// Map a `std::env::consts::ARCH` value
    pub fn from_rust_arch(arch: &str) -> Self {
        match arch {
            "x86" => Self::X86,
            "x86_64" => Self::X64,
            other => Self::Other(other.to_string()),
        }
    }

    /// Subdirectory holding this architecture's binary
    pub fn dir_name(&self) -> Option<&'static str> {
        match self {
            Self::X86 => Some("x86"),
            Self::X64 => Some("x64"),
            Self::Other(_) => None,
        }
    }
}

impl std::fmt::Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X86 => write!(f, "x86"),
            Self::X64 => write!(f, "x64"),
            Self::Other(arch) => write!(f, "{}", arch),
        }
    }
}

/// Strategy for finding the signtool binary
pub trait ToolLocator: Send + Sync + std::fmt::Debug {
    /// Resolve the binary path. Must not spawn anything.
    fn locate(&self) -> Result<PathBuf>;
}

/// Binaries shipped as `<root>/<arch>/signtool.exe`
#[derive(Debug, Clone)]
pub struct BundledLocator {
    root: PathBuf,
    arch: Architecture,
}

impl BundledLocator {
    /// Locator for the current architecture under `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            arch: Architecture::current(),
        }
    }

    /// Override the architecture
    pub fn with_architecture(mut self, arch: Architecture) -> Self {
        self.arch = arch;
        self
    }

    /// Root from `AUTHSIGN_ROOT`, else a `signtool` directory next to the executable
    pub fn from_env() -> Self {
        let root = std::env::var_os(ROOT_ENV)
            .map(PathBuf::from)
            .or_else(|| {
                std::env::current_exe()
                    .ok()
                    .and_then(|exe| exe.parent().map(|dir| dir.join("signtool")))
            })
            .unwrap_or_else(|| PathBuf::from("signtool"));
        Self::new(root)
    }

    /// Bundled root directory
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ToolLocator for BundledLocator {
    fn locate(&self) -> Result<PathBuf> {
        let dir = self
            .arch
            .dir_name()
            .ok_or_else(|| AuthsignError::UnsupportedArchitecture {
                arch: self.arch.to_string(),
            })?;
        let path = self.root.join(dir).join(BINARY_NAME);
        debug!(path = %path.display(), arch = %self.arch, "resolved bundled signtool");
        Ok(path)
    }
}

/// A binary at a known path
#[derive(Debug, Clone)]
pub struct FixedLocator {
    path: PathBuf,
}

impl FixedLocator {
    /// Locator that always returns `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ToolLocator for FixedLocator {
    fn locate(&self) -> Result<PathBuf> {
        Ok(self.path.clone())
    }
}

/// A binary found on `PATH`
#[derive(Debug, Clone)]
pub struct SearchPathLocator {
    program: String,
}

impl SearchPathLocator {
    /// Locator that searches `PATH` for `program`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for SearchPathLocator {
    fn default() -> Self {
        Self::new("signtool")
    }
}

impl ToolLocator for SearchPathLocator {
    fn locate(&self) -> Result<PathBuf> {
        which::which(&self.program).map_err(|e| {
            AuthsignError::Spawn(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found in PATH: {}", self.program, e),
            ))
        })
    }
}
