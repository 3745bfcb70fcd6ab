//! YAML snapshot export
//!
//! Same content as the JSON snapshot, for reading by people.

use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::export::json::FullExport;
use crate::storage::{CategoryStore, ExpenseStore};

/// Write a snapshot of `store` as YAML with a short comment header
pub fn export_full_yaml<S, W>(store: &S, writer: &mut W) -> BudgetResult<()>
where
    S: CategoryStore + ExpenseStore + ?Sized,
    W: Write,
{
    let export = FullExport::from_store(store)?;

    write!(
        writer,
        "# HomeBudget export\n# Generated: {}\n# App Version: {}\n\n",
        export.exported_at, export.app_version
    )
    .map_err(|e| BudgetError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| BudgetError::Export(e.to_string()))
}

/// Parse and validate a YAML snapshot
pub fn import_from_yaml(yaml: &str) -> BudgetResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml).map_err(|e| BudgetError::Import(e.to_string()))?;
    export.validate().map_err(BudgetError::Import)?;
    Ok(export)
}
