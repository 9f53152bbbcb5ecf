//! Flag table command

use authsign_core::{FlagRow, Operation};
use clap::Args;
use console::style;
use tracing::info;

use crate::cli::{output, Cli, OutputFormat};

/// Show the option-to-flag table of an operation
#[derive(Debug, Args)]
pub struct FlagsCommand {
    /// Operation (sign, verify, timestamp, catdb)
    #[arg(required = true)]
    pub operation: String,
}

impl FlagsCommand {
    /// Execute the flags command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let operation: Operation = self.operation.parse()?;
        info!(operation = %operation, "executing flags command");
        let rows = operation.flag_rows();

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "operation": operation,
                    "flags": rows,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                println!("{}", output::header(&format!("signtool {}", operation)));
                println!();
                for row in &rows {
                    println!("{}", format_row(row));
                }
            }
        }

        Ok(())
    }
}

fn format_row(row: &FlagRow) -> String {
    let indent = if row.parent.is_some() { "    " } else { "  " };
    format!(
        "{}{:<24} {:<12} {}",
        indent,
        row.field,
        style(row.token).cyan(),
        style(row.arity).dim()
    )
}
