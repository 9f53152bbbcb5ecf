//! Catalog database command

use std::path::PathBuf;

use authsign_core::CatdbOptions;
use clap::Args;
use tracing::info;

use super::{override_value, Session};
use crate::cli::Cli;

/// Add or remove catalog files in a catalog database
#[derive(Debug, Args)]
pub struct CatdbCommand {
    /// Catalog files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Use the default catalog database (/d)
    #[arg(long)]
    pub default: bool,

    /// Catalog database GUID (/g)
    #[arg(short = 'g', long)]
    pub guid: Option<String>,

    /// Remove the catalog files instead of adding them (/r)
    #[arg(short = 'r', long)]
    pub remove: bool,

    /// Generate unique catalog file names (/u)
    #[arg(short = 'u', long)]
    pub unique: bool,
}

impl CatdbCommand {
    /// Execute the catdb command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(files = self.files.len(), remove = self.remove, "executing catdb command");
        let session = Session::load(cli)?;
        let options = self.options(session.config.catdb.clone());
        session.execute(cli, &self.files, &options)
    }

    fn options(&self, mut options: CatdbOptions) -> CatdbOptions {
        options.default |= self.default;
        options.remove |= self.remove;
        options.unique |= self.unique;
        override_value(&mut options.guid, &self.guid);
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Commands;
    use clap::Parser;

    #[test]
    fn test_catdb_flags() {
        let cli = Cli::try_parse_from(["authsign", "catdb", "x.cat", "-r", "-g", "{ABC}"]).unwrap();
        let Commands::Catdb(cmd) = cli.command else {
            panic!("expected catdb");
        };

        let options = cmd.options(CatdbOptions::default());
        assert!(options.remove);
        assert!(!options.unique);
        assert_eq!(options.guid.as_deref(), Some("{ABC}"));
    }
}
