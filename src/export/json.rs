//! JSON snapshot export and import
//!
//! A snapshot holds every category and expense plus version metadata.
//! Imported snapshots become a [`MemoryStore`] that the reports can run
//! against directly.

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Category, Expense};
use crate::storage::{read_json_required, CategoryStore, ExpenseStore, MemoryStore};

/// Current snapshot schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Complete dump of a budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,

    /// Version of the program that wrote the snapshot
    pub app_version: String,

    pub categories: Vec<Category>,
    pub expenses: Vec<Expense>,
}

impl FullExport {
    /// Snapshot the current contents of a store
    pub fn from_store<S>(store: &S) -> BudgetResult<Self>
    where
        S: CategoryStore + ExpenseStore + ?Sized,
    {
        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            categories: store.list_categories()?,
            expenses: store.list_expenses()?,
        })
    }

    /// Check the schema version, id uniqueness and category references
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let mut category_ids = HashSet::new();
        for category in &self.categories {
            if !category_ids.insert(category.id) {
                return Err(format!("Duplicate category id {}", category.id));
            }
        }

        let mut expense_ids = HashSet::new();
        for expense in &self.expenses {
            if !expense_ids.insert(expense.id) {
                return Err(format!("Duplicate expense id {}", expense.id));
            }
            if !category_ids.contains(&expense.category_id) {
                return Err(format!(
                    "Expense {} references unknown category {}",
                    expense.id, expense.category_id
                ));
            }
        }

        Ok(())
    }

    /// Turn the snapshot into an in-memory store
    pub fn into_store(self) -> MemoryStore {
        MemoryStore::new(self.categories, self.expenses)
    }
}

/// Write a snapshot of `store` as JSON
pub fn export_full_json<S, W>(store: &S, writer: &mut W, pretty: bool) -> BudgetResult<()>
where
    S: CategoryStore + ExpenseStore + ?Sized,
    W: Write,
{
    let export = FullExport::from_store(store)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| BudgetError::Export(e.to_string()))
}

/// Parse and validate a JSON snapshot
pub fn import_from_json(json: &str) -> BudgetResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json).map_err(|e| BudgetError::Import(e.to_string()))?;
    export.validate().map_err(BudgetError::Import)?;
    Ok(export)
}

/// Read and validate a JSON snapshot file
pub fn read_snapshot(path: impl AsRef<Path>) -> BudgetResult<FullExport> {
    let export: FullExport = read_json_required(path)?;
    export.validate().map_err(BudgetError::Import)?;
    Ok(export)
}
