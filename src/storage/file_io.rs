//! File helpers for exports and imports
//!
//! Exports are written to a temporary sibling and renamed into place so a
//! failed write never leaves a truncated file behind.

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{BudgetError, BudgetResult};

/// Write bytes to `path` atomically, creating parent directories
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> BudgetResult<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            BudgetError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    let mut file = File::create(temp_path)
        .map_err(|e| BudgetError::Io(format!("Failed to create temp file: {}", e)))?;
    file.write_all(contents)
        .and_then(|_| file.sync_all())
        .map_err(|e| BudgetError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

    fs::rename(temp_path, path).map_err(|e| {
        let _ = fs::remove_file(temp_path);
        BudgetError::Io(format!("Failed to move {} into place: {}", path.display(), e))
    })
}

/// Read and parse a JSON file that must exist
pub fn read_json_required<T, P>(path: P) -> BudgetResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let file = File::open(path)
        .map_err(|e| BudgetError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| BudgetError::Json(format!("Failed to parse {}: {}", path.display(), e)))
}
