//! CLI commands

mod catdb;
mod flags;
mod sign;
mod timestamp;
mod verify;

pub use catdb::CatdbCommand;
pub use flags::FlagsCommand;
pub use sign::SignCommand;
pub use timestamp::TimestampCommand;
pub use verify::VerifyCommand;

use std::path::PathBuf;

use authsign_core::{
    build_args, load_config, load_config_or_default, CommandLine, Config, FlagTable, RunOptions,
    SignTool, Target, ToolOutput,
};
use tracing::{debug, info};

use crate::cli::{output, Cli, OutputFormat};

/// Config, runner and run options for one invocation
pub(crate) struct Session {
    pub config: Config,
    pub tool: SignTool,
    pub run: RunOptions,
}

impl Session {
    /// Load configuration and merge global CLI flags over it
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let config = match &cli.config {
            Some(path) => {
                let mut config = load_config(path)?;
                if let Some(base) = path.parent() {
                    config.resolve_paths(base);
                }
                config
            }
            None => {
                let base = match &cli.directory {
                    Some(dir) => dir.clone(),
                    None => std::env::current_dir()?,
                };
                load_config_or_default(&base)?.0
            }
        };

        let run = merge_run_options(config.run_options(), cli);
        let tool = config.sign_tool();
        debug!(host = ?tool.host(), "session ready");

        Ok(Self { config, tool, run })
    }

    /// Run (or with --dry-run, print) one operation
    pub fn execute<O: FlagTable>(
        &self,
        cli: &Cli,
        files: &[PathBuf],
        options: &O,
    ) -> anyhow::Result<()> {
        let target = Target::Files(files.to_vec());
        let operation = O::OPERATION;

        if cli.dry_run {
            let line = self.tool.command_line(build_args(options, &target), &self.run)?;
            println!("{}", render_command_line(&line, cli.format)?);
            return Ok(());
        }

        info!(operation = %operation, files = target.len(), "running signtool");
        let rt = tokio::runtime::Runtime::new()?;
        let result = rt.block_on(self.tool.execute(&target, options, &self.run))?;

        report(cli, &result, &format!("{} {} file(s)", past_tense(operation), target.len()))
    }
}

/// Dry-run rendering; the password never appears in either format
fn render_command_line(line: &CommandLine, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(&line.redacted())?,
        OutputFormat::Text => line.display(),
    })
}

fn merge_run_options(mut run: RunOptions, cli: &Cli) -> RunOptions {
    run.cwd = cli.directory.clone();
    run.verbose |= cli.verbose > 0;
    run.quiet |= cli.quiet;
    run.debug |= cli.debug;
    if cli.stdio.is_some() {
        run.stdio = cli.stdio;
    }
    run
}

fn past_tense(operation: authsign_core::Operation) -> &'static str {
    match operation {
        authsign_core::Operation::Sign => "Signed",
        authsign_core::Operation::Verify => "Verified",
        authsign_core::Operation::Timestamp => "Timestamped",
        authsign_core::Operation::Catdb => "Updated catalog database with",
    }
}

fn report(cli: &Cli, result: &ToolOutput, summary: &str) -> anyhow::Result<()> {
    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        OutputFormat::Text => {
            if !result.stdout.is_empty() && !cli.quiet {
                print!("{}", result.stdout);
            }
            if !result.stderr.is_empty() {
                eprint!("{}", result.stderr);
            }
            if !cli.quiet {
                output::success(summary);
            }
        }
    }
    Ok(())
}

/// Replace `slot` when the CLI supplied a value
pub(crate) fn override_value<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
    if value.is_some() {
        slot.clone_from(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authsign_core::{AuthsignError, ConfigError, StdioMode};
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_override_value() {
        let mut slot = Some("config".to_string());
        override_value(&mut slot, &None);
        assert_eq!(slot.as_deref(), Some("config"));

        override_value(&mut slot, &Some("cli".to_string()));
        assert_eq!(slot.as_deref(), Some("cli"));
    }

    #[test]
    fn test_merge_run_options() {
        let cli = Cli::try_parse_from([
            "authsign", "-v", "-C", "/work", "--stdio", "null", "catdb", "x.cat",
        ])
        .unwrap();
        let base = RunOptions {
            debug: true,
            stdio: Some(StdioMode::Inherit),
            ..Default::default()
        };

        let run = merge_run_options(base, &cli);
        assert!(run.verbose);
        assert!(run.debug);
        assert!(!run.quiet);
        assert_eq!(run.cwd, Some(PathBuf::from("/work")));
        assert_eq!(run.stdio, Some(StdioMode::Null));
    }

    #[test]
    fn test_invalid_config_fails_session() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("authsign.toml"),
            "[tool]\npath = \"a.exe\"\nroot = \"vendor\"\n\n[sign]\nauto = true\n",
        )
        .unwrap();
        let dir = temp.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["authsign", "-C", dir, "sign", "a.exe"]).unwrap();

        let err = Session::load(&cli).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<AuthsignError>(),
            Some(AuthsignError::Config(ConfigError::InvalidValue { .. }))
        ));
        assert_eq!(crate::exit_codes::for_error(&err), crate::exit_codes::CONFIG_ERROR);
    }

    #[test]
    fn test_dry_run_masks_password_in_both_formats() {
        let line = CommandLine {
            program: PathBuf::from("signtool.exe"),
            args: ["sign", "/f", "cert.pfx", "/p", "hunter2", "a.exe"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };

        let json = render_command_line(&line, OutputFormat::Json).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(json.contains("****"));

        let text = render_command_line(&line, OutputFormat::Text).unwrap();
        assert_eq!(text, "signtool.exe sign /f cert.pfx /p **** a.exe");
    }

    #[test]
    fn test_merge_keeps_config_stdio_without_flag() {
        let cli = Cli::try_parse_from(["authsign", "verify", "a.exe"]).unwrap();
        let base = RunOptions {
            stdio: Some(StdioMode::Inherit),
            ..Default::default()
        };
        assert_eq!(merge_run_options(base, &cli).stdio, Some(StdioMode::Inherit));
    }
}
