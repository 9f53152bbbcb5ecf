//! Timestamp command

use std::path::PathBuf;

use authsign_core::TimestampOptions;
use clap::Args;
use tracing::info;

use super::{override_value, Session};
use crate::cli::Cli;

/// Time stamp signed files
#[derive(Debug, Args)]
pub struct TimestampCommand {
    /// Files to timestamp
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Authenticode timestamp server URL (/t)
    #[arg(short = 't', long)]
    pub url: Option<String>,

    /// RFC 3161 timestamp server URL (/tr)
    #[arg(long = "tr", visible_alias = "rfc-url")]
    pub rfc_url: Option<String>,

    /// RFC 3161 digest algorithm (/td)
    #[arg(long = "td", visible_alias = "algorithm")]
    pub algorithm: Option<String>,

    /// Signature index to timestamp (/tp)
    #[arg(long = "tp", visible_alias = "index")]
    pub index: Option<u32>,
}

impl TimestampCommand {
    /// Execute the timestamp command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(files = self.files.len(), "executing timestamp command");
        let session = Session::load(cli)?;
        let options = self.options(session.config.timestamp.clone());
        session.execute(cli, &self.files, &options)
    }

    fn options(&self, mut options: TimestampOptions) -> TimestampOptions {
        override_value(&mut options.url, &self.url);
        override_value(&mut options.rfc_url, &self.rfc_url);
        override_value(&mut options.algorithm, &self.algorithm);
        override_value(&mut options.index, &self.index);
        options
    }
}
