//! SQLite database handle
//!
//! Owns the connection used by the category and expense repositories.
//! The handle is created and dropped by the caller; nothing here is global.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{params, Connection};

use crate::error::{BudgetError, BudgetResult};
use crate::models::CategoryType;

use super::categories::CategoryRepository;
use super::expenses::ExpenseRepository;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS categoryTypes (
        Id INTEGER PRIMARY KEY,
        Description TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS categories (
        Id INTEGER PRIMARY KEY AUTOINCREMENT,
        Description TEXT NOT NULL,
        TypeId INTEGER NOT NULL REFERENCES categoryTypes(Id)
    );
    CREATE TABLE IF NOT EXISTS expenses (
        Id INTEGER PRIMARY KEY AUTOINCREMENT,
        Date TEXT NOT NULL,
        Description TEXT NOT NULL DEFAULT '',
        Amount REAL NOT NULL,
        CategoryId INTEGER NOT NULL REFERENCES categories(Id)
    );
";

/// An open budget database
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// Create a fresh database file, replacing any file already at `path`
    ///
    /// The new database is seeded with the default categories.
    pub fn create(path: impl AsRef<Path>) -> BudgetResult<Self> {
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

        if path.exists() {
            fs::remove_file(path).map_err(|e| {
                BudgetError::Io(format!("Failed to replace {}: {}", path.display(), e))
            })?;
        }

        let conn = Connection::open(path)?;
        let db = Self::initialize(conn, Some(path.to_path_buf()))?;
        db.categories().reset_to_defaults()?;
        Ok(db)
    }

    /// Open an existing database file
    pub fn open(path: impl AsRef<Path>) -> BudgetResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(BudgetError::Io(format!(
                "Database file not found: {}",
                path.display()
            )));
        }

        let conn = Connection::open(path)?;
        Self::initialize(conn, Some(path.to_path_buf()))
    }

    /// Open `path`, creating a new seeded database when asked to or when
    /// the file does not exist yet
    pub fn open_or_create(path: impl AsRef<Path>, create_new: bool) -> BudgetResult<Self> {
        let path = path.as_ref();
        if create_new || !path.exists() {
            Self::create(path)
        } else {
            Self::open(path)
        }
    }

    /// A seeded database that lives only as long as the handle
    pub fn open_in_memory() -> BudgetResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self::initialize(conn, None)?;
        db.categories().reset_to_defaults()?;
        Ok(db)
    }

    /// An in-memory database with the schema but no categories
    pub fn open_in_memory_empty() -> BudgetResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(conn, None)
    }

    fn initialize(conn: Connection, path: Option<PathBuf>) -> BudgetResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch(SCHEMA)?;

        for category_type in CategoryType::all() {
            conn.execute(
                "INSERT OR IGNORE INTO categoryTypes (Id, Description) VALUES (?1, ?2)",
                params![category_type.as_i64(), category_type.name()],
            )?;
        }

        Ok(Self { conn, path })
    }

    /// Path of the backing file, `None` for in-memory databases
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn categories(&self) -> CategoryRepository<'_> {
        CategoryRepository::new(&self.conn)
    }

    pub fn expenses(&self) -> ExpenseRepository<'_> {
        ExpenseRepository::new(&self.conn)
    }

    /// Whether foreign key enforcement is active on this connection
    pub fn foreign_keys_enabled(&self) -> BudgetResult<bool> {
        let enabled: i64 = self
            .conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))?;
        Ok(enabled == 1)
    }

    /// Close the connection, releasing the file
    pub fn close(self) -> BudgetResult<()> {
        self.conn.close().map_err(|(_, e)| BudgetError::from(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn table_names(db: &Database) -> Vec<String> {
        let mut stmt = db
            .connection()
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<String>, _>>()
            .unwrap()
    }

    fn column_names(db: &Database, table: &str) -> Vec<String> {
        let mut stmt = db
            .connection()
            .prepare(&format!("PRAGMA table_info({})", table))
            .unwrap();
        stmt.query_map([], |row| row.get(1))
            .unwrap()
            .collect::<Result<Vec<String>, _>>()
            .unwrap()
    }

    #[test]
    fn test_new_database_creates_tables() {
        let db = Database::open_in_memory().unwrap();
        let tables = table_names(&db);
        for table in ["categoryTypes", "categories", "expenses"] {
            assert!(tables.iter().any(|t| t == table), "missing table {}", table);
        }
    }

    #[test]
    fn test_expense_columns() {
        let db = Database::open_in_memory().unwrap();
        let columns = column_names(&db, "expenses");
        for column in ["Id", "CategoryId", "Amount", "Date", "Description"] {
            assert!(columns.iter().any(|c| c == column), "missing column {}", column);
        }
    }

    #[test]
    fn test_category_columns() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(column_names(&db, "categories"), vec!["Id", "Description", "TypeId"]);
        assert_eq!(column_names(&db, "categoryTypes"), vec!["Id", "Description"]);
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.foreign_keys_enabled().unwrap());
    }

    #[test]
    fn test_create_seeds_defaults() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.categories().count().unwrap(), 16);

        let empty = Database::open_in_memory_empty().unwrap();
        assert_eq!(empty.categories().count().unwrap(), 0);
    }

    #[test]
    fn test_open_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = Database::open(temp_dir.path().join("missing.db"));
        assert!(matches!(result, Err(BudgetError::Io(_))));
    }

    #[test]
    fn test_create_then_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("budget.db");

        let db = Database::create(&path).unwrap();
        let added = db.categories().add("Pets", CategoryType::Expense).unwrap();
        assert_eq!(db.path(), Some(path.as_path()));
        db.close().unwrap();

        let reopened = Database::open_or_create(&path, false).unwrap();
        let found = reopened.categories().get_by_id(added.id).unwrap();
        assert_eq!(found.description, "Pets");
    }

    #[test]
    fn test_create_new_replaces_existing_data() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget.db");

        let db = Database::create(&path).unwrap();
        db.categories().add("Pets", CategoryType::Expense).unwrap();
        db.close().unwrap();

        let fresh = Database::open_or_create(&path, true).unwrap();
        assert_eq!(fresh.categories().count().unwrap(), 16);
    }
}
