//! Append-only JSONL audit log

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{BudgetError, BudgetResult};

use super::entry::{AuditEntry, EntityType};

/// Writes and reads the audit log file
///
/// Each entry is one JSON object on its own line, flushed as soon as it is
/// written.
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
        }
    }

    /// Append one entry
    pub fn log(&self, entry: &AuditEntry) -> BudgetResult<()> {
        self.append(std::slice::from_ref(entry))
    }

    /// Append several entries with a single flush
    pub fn append(&self, entries: &[AuditEntry]) -> BudgetResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| BudgetError::Io(format!("Failed to create audit directory: {}", e)))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| BudgetError::Io(format!("Failed to open audit log: {}", e)))?;

        for entry in entries {
            let line = serde_json::to_string(entry)?;
            writeln!(file, "{}", line)
                .map_err(|e| BudgetError::Io(format!("Failed to write audit entry: {}", e)))?;
        }

        file.flush()
            .map_err(|e| BudgetError::Io(format!("Failed to flush audit log: {}", e)))
    }

    /// Every entry, oldest first
    pub fn read_all(&self) -> BudgetResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| BudgetError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                BudgetError::Io(format!("Failed to read audit log line {}: {}", index + 1, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(&line).map_err(|e| {
                BudgetError::Json(format!("Bad audit entry at line {}: {}", index + 1, e))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> BudgetResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let skip = entries.len().saturating_sub(count);
        Ok(entries.split_off(skip))
    }

    /// History of a single category or expense
    pub fn read_for_entity(
        &self,
        entity_type: EntityType,
        entity_id: &str,
    ) -> BudgetResult<Vec<AuditEntry>> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|e| e.is_about(entity_type, entity_id))
            .collect())
    }

    pub fn entry_count(&self) -> BudgetResult<usize> {
        Ok(self.read_all()?.len())
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use serde_json::json;
    use tempfile::TempDir;

    fn logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn created(id: i64) -> AuditEntry {
        AuditEntry::create(
            EntityType::Expense,
            format!("exp-{}", id),
            None,
            &json!({ "id": id }),
        )
    }

    #[test]
    fn test_missing_log_reads_empty() {
        let (logger, _temp) = logger();
        assert!(logger.read_all().unwrap().is_empty());
        assert_eq!(logger.entry_count().unwrap(), 0);
    }

    #[test]
    fn test_log_and_read_back() {
        let (logger, _temp) = logger();
        logger.log(&created(1)).unwrap();
        logger
            .log(&AuditEntry::delete(EntityType::Expense, "exp-1", None, &json!({"id": 1})))
            .unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[1].operation, Operation::Delete);
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = logger();
        let batch: Vec<_> = (1..=10).map(created).collect();
        logger.append(&batch).unwrap();

        let recent = logger.read_recent(3).unwrap();
        let ids: Vec<_> = recent.iter().map(|e| e.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["exp-8", "exp-9", "exp-10"]);
        assert_eq!(logger.read_recent(50).unwrap().len(), 10);
    }

    #[test]
    fn test_read_for_entity() {
        let (logger, _temp) = logger();
        logger.append(&[created(1), created(2), created(1)]).unwrap();
        logger
            .log(&AuditEntry::create(EntityType::Category, "exp-1", None, &json!({})))
            .unwrap();

        let history = logger.read_for_entity(EntityType::Expense, "exp-1").unwrap();
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_reopened_logger_sees_entries() {
        let (logger, temp) = logger();
        logger.log(&created(1)).unwrap();

        let reopened = AuditLogger::new(temp.path().join("audit.log"));
        assert_eq!(reopened.entry_count().unwrap(), 1);
    }

    #[test]
    fn test_corrupt_line_is_reported() {
        let (logger, _temp) = logger();
        fs::write(logger.path(), "not json\n").unwrap();
        assert!(matches!(logger.read_all(), Err(BudgetError::Json(_))));
    }
}
