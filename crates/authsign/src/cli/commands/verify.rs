//! Verify command

use std::path::PathBuf;

use authsign_core::VerifyOptions;
use clap::Args;
use tracing::info;

use super::{override_value, Session};
use crate::cli::Cli;

/// Verify the signature of files
#[derive(Debug, Args)]
pub struct VerifyCommand {
    /// Files to verify
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Try every verification method (/a)
    #[arg(long)]
    pub all_methods: bool,

    /// Use the default Authenticode verification policy (/pa)
    #[arg(long = "pa", visible_alias = "default-auth-policy")]
    pub default_auth_policy: bool,

    /// Verify all signatures in the file (/all)
    #[arg(long)]
    pub all: bool,

    /// Verify the signature at this index (/ds)
    #[arg(long)]
    pub index: Option<u32>,

    /// Print the description and description URL (/d)
    #[arg(long)]
    pub show_description: bool,
}

impl VerifyCommand {
    /// Execute the verify command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(files = self.files.len(), "executing verify command");
        let session = Session::load(cli)?;
        let options = self.options(session.config.verify.clone());
        session.execute(cli, &self.files, &options)
    }

    /// Merge CLI flags over the configured preset
    fn options(&self, mut options: VerifyOptions) -> VerifyOptions {
        options.use_all_methods |= self.all_methods;
        options.default_auth_policy |= self.default_auth_policy;
        options.verify_all_signatures |= self.all;
        options.show_description |= self.show_description;
        override_value(&mut options.index, &self.index);

        if options == VerifyOptions::default() {
            info!("no verify options given, trying all verification methods");
            return VerifyOptions::all_methods();
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Commands;
    use clap::Parser;

    fn parse(args: &[&str]) -> VerifyCommand {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Verify(cmd) => cmd,
            other => panic!("expected verify, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_options_default_to_all_methods() {
        let cmd = parse(&["authsign", "verify", "a.exe"]);
        assert_eq!(cmd.options(VerifyOptions::default()), VerifyOptions::all_methods());
    }

    #[test]
    fn test_flags_merge_with_preset() {
        let cmd = parse(&["authsign", "verify", "a.exe", "--pa", "--index", "1"]);
        let preset = VerifyOptions {
            verify_timestamp: true,
            ..Default::default()
        };

        let options = cmd.options(preset);
        assert!(options.default_auth_policy);
        assert!(options.verify_timestamp);
        assert!(!options.use_all_methods);
        assert_eq!(options.index, Some(1));
    }
}
