//! Configuration loading
//!
//! An optional `authsign.toml` / `authsign.yaml` supplies the tool location,
//! default run options and per-operation option presets.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AuthsignError, ConfigError, Result};
use crate::locator::{BundledLocator, FixedLocator, SearchPathLocator};
use crate::options::{CatdbOptions, SignOptions, TimestampOptions, VerifyOptions};
use crate::runner::{HostPlatform, RunOptions, SignTool, StdioMode, DEFAULT_COMPAT_PROGRAM};

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "authsign.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "authsign.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".authsign.toml",
        ".authsign.yaml",
    ]
}

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where signtool lives and how to run it
    pub tool: ToolConfig,
    /// Default process-level controls
    pub run: RunConfig,
    /// Preset sign options
    pub sign: SignOptions,
    /// Preset verify options
    pub verify: VerifyOptions,
    /// Preset timestamp options
    pub timestamp: TimestampOptions,
    /// Preset catdb options
    pub catdb: CatdbOptions,
}

/// Tool location configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Fixed path to signtool.exe
    pub path: Option<PathBuf>,
    /// Root of bundled binaries (`<root>/<arch>/signtool.exe`)
    pub root: Option<PathBuf>,
    /// Look signtool up on PATH
    pub search_path: bool,
    /// Program used to run signtool on non-Windows hosts
    pub compat_program: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            path: None,
            root: None,
            search_path: false,
            compat_program: DEFAULT_COMPAT_PROGRAM.to_string(),
        }
    }
}

/// Default run options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub verbose: bool,
    pub debug: bool,
    pub quiet: bool,
    pub stdio: Option<StdioMode>,
}

impl Config {
    /// Run options seeded from the `[run]` section
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            cwd: None,
            stdio: self.run.stdio,
            debug: self.run.debug,
            verbose: self.run.verbose,
            quiet: self.run.quiet,
        }
    }

    /// Build a runner according to the `[tool]` section
    pub fn sign_tool(&self) -> SignTool {
        let tool = if let Some(path) = &self.tool.path {
            SignTool::new(FixedLocator::new(path))
        } else if let Some(root) = &self.tool.root {
            SignTool::new(BundledLocator::new(root))
        } else if self.tool.search_path {
            SignTool::new(SearchPathLocator::default())
        } else {
            SignTool::new(BundledLocator::from_env())
        };
        tool.with_compat_program(&self.tool.compat_program)
    }

    /// Like [`Config::sign_tool`] with an explicit host
    pub fn sign_tool_for(&self, host: HostPlatform) -> SignTool {
        self.sign_tool().with_host(host)
    }

    /// Anchor relative `tool.path` / `tool.root` at `base`, the directory of
    /// the config file they were read from
    pub fn resolve_paths(&mut self, base: &Path) {
        for slot in [&mut self.tool.path, &mut self.tool.root] {
            if let Some(path) = slot.as_mut() {
                if !is_rooted(path) {
                    *path = base.join(&*path);
                }
            }
        }
    }
}

/// Absolute on this host, or carrying a drive letter (`C:/...`), which the
/// compatibility layer understands on other hosts
fn is_rooted(path: &Path) -> bool {
    if path.is_absolute() {
        return true;
    }
    let bytes = path.as_os_str().as_encoded_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    let located = [
        config.tool.path.is_some(),
        config.tool.root.is_some(),
        config.tool.search_path,
    ];
    if located.iter().filter(|set| **set).count() > 1 {
        return Err(ConfigError::InvalidValue {
            field: "tool".to_string(),
            message: "only one of path, root and search_path may be set".to_string(),
        }
        .into());
    }

    if config.tool.compat_program.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "tool.compat_program".to_string(),
            message: "must not be empty".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Load configuration from a file
pub fn load_config(path: &Path) -> Result<Config> {
    let format = if path.extension().is_some_and(|e| e == "toml") {
        "TOML"
    } else {
        "YAML"
    };
    info!(path = %path.display(), format, "loading config");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

    let config: Config = if format == "TOML" {
        toml::from_str(&content).map_err(ConfigError::Toml)?
    } else {
        serde_yaml::from_str(&content).map_err(ConfigError::Yaml)?
    };

    validate_config(&config)?;
    debug!(path = %path.display(), "config loaded and validated");
    Ok(config)
}

/// Find configuration file in directory or parent directories.
///
/// At each level `<dir>/<name>` is checked before `<dir>/.github/<name>`.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in config_file_names() {
            let config_path = current.join(name);
            if config_path.exists() {
                info!(path = %config_path.display(), "found config file");
                return Some(config_path);
            }

            let github_path = current.join(".github").join(name);
            if github_path.exists() {
                info!(path = %github_path.display(), "found config file in .github/");
                return Some(github_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Load configuration from directory (searching parent directories)
pub fn load_config_from_dir(dir: &Path) -> Result<(Config, PathBuf)> {
    let config_path = find_config(dir).ok_or_else(|| ConfigError::NotFound(dir.to_path_buf()))?;

    let mut config = load_config(&config_path)?;
    if let Some(base) = config_path.parent() {
        config.resolve_paths(base);
    }
    Ok((config, config_path))
}

/// Load configuration, or use defaults when no config file exists.
///
/// A config file that is found but fails to load is an error.
pub fn load_config_or_default(dir: &Path) -> Result<(Config, Option<PathBuf>)> {
    match load_config_from_dir(dir) {
        Ok((config, path)) => Ok((config, Some(path))),
        Err(AuthsignError::Config(ConfigError::NotFound(_))) => {
            warn!(dir = %dir.display(), "no config file found, using defaults");
            Ok((Config::default(), None))
        }
        Err(e) => Err(e),
    }
}
