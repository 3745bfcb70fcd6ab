//! CLI commands for data export
//!
//! Writes full snapshots of the categories and expenses as JSON or YAML.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::error::BudgetResult;
use crate::export::{export_full_json, export_full_yaml, read_snapshot};
use crate::storage::{write_atomic, Storage};

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all data as JSON
    Json {
        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Export all data as YAML
    Yaml {
        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that a JSON snapshot can be read back
    Verify {
        /// Snapshot file
        file: PathBuf,
    },
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> BudgetResult<()> {
    match cmd {
        ExportCommands::Json { output, pretty } => {
            let mut buffer = Vec::new();
            export_full_json(storage, &mut buffer, pretty)?;
            emit(&buffer, output.as_deref())
        }
        ExportCommands::Yaml { output } => {
            let mut buffer = Vec::new();
            export_full_yaml(storage, &mut buffer)?;
            emit(&buffer, output.as_deref())
        }
        ExportCommands::Verify { file } => {
            let snapshot = read_snapshot(&file)?;
            println!("Snapshot is valid (schema {})", snapshot.schema_version);
            println!("  Exported at: {}", snapshot.exported_at);
            println!("  Categories:  {}", snapshot.categories.len());
            println!("  Expenses:    {}", snapshot.expenses.len());
            Ok(())
        }
    }
}

fn emit(contents: &[u8], output: Option<&Path>) -> BudgetResult<()> {
    match output {
        Some(path) => {
            write_atomic(path, contents)?;
            println!("Full database exported to: {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(contents)?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
