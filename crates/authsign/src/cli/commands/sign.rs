//! Sign command

use std::path::PathBuf;

use authsign_core::SignOptions;
use clap::Args;
use tracing::info;

use super::{override_value, Session};
use crate::cli::Cli;

/// Digitally sign files
#[derive(Debug, Args)]
pub struct SignCommand {
    /// Files to sign
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Select the best signing certificate automatically (/a)
    #[arg(long)]
    pub auto: bool,

    /// Signing certificate file (/f)
    #[arg(short = 'f', long)]
    pub certificate: Option<String>,

    /// Certificate password (/p)
    #[arg(short = 'p', long, env = "AUTHSIGN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Certificate SHA1 thumbprint (/sha1)
    #[arg(long)]
    pub sha1: Option<String>,

    /// Certificate subject name (/n)
    #[arg(short = 'n', long)]
    pub subject: Option<String>,

    /// File digest algorithm (/fd)
    #[arg(long = "fd", visible_alias = "algorithm")]
    pub algorithm: Option<String>,

    /// RFC 3161 timestamp server URL (/tr)
    #[arg(long = "tr", visible_alias = "rfc-timestamp")]
    pub rfc_timestamp: Option<String>,

    /// RFC 3161 timestamp digest algorithm (/td)
    #[arg(long = "td", visible_alias = "timestamp-algo")]
    pub timestamp_algo: Option<String>,

    /// Description of the signed content (/d)
    #[arg(short = 'd', long)]
    pub description: Option<String>,
}

impl SignCommand {
    /// Execute the sign command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(files = self.files.len(), "executing sign command");
        let session = Session::load(cli)?;
        let options = self.options(session.config.sign.clone());
        session.execute(cli, &self.files, &options)
    }

    /// Merge CLI flags over the configured preset
    fn options(&self, mut options: SignOptions) -> SignOptions {
        options.auto |= self.auto;
        override_value(&mut options.certificate, &self.certificate);
        override_value(&mut options.password, &self.password);
        override_value(&mut options.sha1, &self.sha1);
        override_value(&mut options.subject, &self.subject);
        override_value(&mut options.algorithm, &self.algorithm);
        override_value(&mut options.rfc_timestamp, &self.rfc_timestamp);
        override_value(&mut options.timestamp_algo, &self.timestamp_algo);
        override_value(&mut options.description, &self.description);

        if options == SignOptions::default() {
            info!("no sign options given, letting signtool choose the certificate");
            return SignOptions::automatic();
        }
        options
    }
}
