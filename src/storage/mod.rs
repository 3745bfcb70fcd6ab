//! Storage layer for HomeBudget
//!
//! Categories and expenses live in a SQLite database. The reports only need
//! read access, expressed by the [`CategoryStore`] and [`ExpenseStore`]
//! traits so that they run the same against the database or a
//! [`MemoryStore`] snapshot.

pub mod categories;
pub mod database;
pub mod expenses;
pub mod file_io;
pub mod memory;

pub use categories::CategoryRepository;
pub use database::Database;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json_required, write_atomic};
pub use memory::MemoryStore;

use std::path::Path;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::{BudgetPaths, Settings};
use crate::error::BudgetResult;
use crate::models::{Category, CategoryId, Expense, ExpenseId};

/// Read access to categories
pub trait CategoryStore {
    /// Every category, in the store's natural (id) order
    fn list_categories(&self) -> BudgetResult<Vec<Category>>;

    /// A single category; `NotFound` if the id is unknown
    fn category_by_id(&self, id: CategoryId) -> BudgetResult<Category>;
}

/// Read access to expenses
pub trait ExpenseStore {
    /// Every expense, in the store's natural (id) order
    fn list_expenses(&self) -> BudgetResult<Vec<Expense>>;

    /// A single expense; `NotFound` if the id is unknown
    fn expense_by_id(&self, id: ExpenseId) -> BudgetResult<Expense>;
}

impl<T: CategoryStore + ?Sized> CategoryStore for &T {
    fn list_categories(&self) -> BudgetResult<Vec<Category>> {
        (**self).list_categories()
    }

    fn category_by_id(&self, id: CategoryId) -> BudgetResult<Category> {
        (**self).category_by_id(id)
    }
}

impl<T: ExpenseStore + ?Sized> ExpenseStore for &T {
    fn list_expenses(&self) -> BudgetResult<Vec<Expense>> {
        (**self).list_expenses()
    }

    fn expense_by_id(&self, id: ExpenseId) -> BudgetResult<Expense> {
        (**self).expense_by_id(id)
    }
}

impl CategoryStore for CategoryRepository<'_> {
    fn list_categories(&self) -> BudgetResult<Vec<Category>> {
        self.list()
    }

    fn category_by_id(&self, id: CategoryId) -> BudgetResult<Category> {
        self.get_by_id(id)
    }
}

impl ExpenseStore for ExpenseRepository<'_> {
    fn list_expenses(&self) -> BudgetResult<Vec<Expense>> {
        self.list()
    }

    fn expense_by_id(&self, id: ExpenseId) -> BudgetResult<Expense> {
        self.get_by_id(id)
    }
}

impl CategoryStore for Database {
    fn list_categories(&self) -> BudgetResult<Vec<Category>> {
        self.categories().list()
    }

    fn category_by_id(&self, id: CategoryId) -> BudgetResult<Category> {
        self.categories().get_by_id(id)
    }
}

impl ExpenseStore for Database {
    fn list_expenses(&self) -> BudgetResult<Vec<Expense>> {
        self.expenses().list()
    }

    fn expense_by_id(&self, id: ExpenseId) -> BudgetResult<Expense> {
        self.expenses().get_by_id(id)
    }
}

/// Main storage coordinator: the database plus the optional audit log
pub struct Storage {
    db: Database,
    audit: Option<AuditLogger>,
}

impl Storage {
    pub fn new(db: Database, audit: Option<AuditLogger>) -> Self {
        Self { db, audit }
    }

    /// Open the configured database, creating it if needed
    ///
    /// `database` overrides the path from the settings. `create_new`
    /// discards any existing data and reseeds the default categories.
    pub fn open(
        paths: &BudgetPaths,
        settings: &Settings,
        database: Option<&Path>,
        create_new: bool,
    ) -> BudgetResult<Self> {
        paths.ensure_directories()?;

        let db = Database::open_or_create(settings.database_path(paths, database), create_new)?;
        let audit = settings
            .audit_enabled
            .then(|| AuditLogger::new(paths.audit_log()));

        Ok(Self::new(db, audit))
    }

    /// A seeded in-memory database with auditing off
    pub fn in_memory() -> BudgetResult<Self> {
        Ok(Self::new(Database::open_in_memory()?, None))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn categories(&self) -> CategoryRepository<'_> {
        self.db.categories()
    }

    pub fn expenses(&self) -> ExpenseRepository<'_> {
        self.db.expenses()
    }

    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Close the database connection
    pub fn close(self) -> BudgetResult<()> {
        self.db.close()
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> BudgetResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&AuditEntry::create(entity_type, entity_id, entity_name, entity)),
            None => Ok(()),
        }
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> BudgetResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&AuditEntry::update(
                entity_type,
                entity_id,
                entity_name,
                before,
                after,
            )),
            None => Ok(()),
        }
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> BudgetResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity)),
            None => Ok(()),
        }
    }
}

impl CategoryStore for Storage {
    fn list_categories(&self) -> BudgetResult<Vec<Category>> {
        self.db.list_categories()
    }

    fn category_by_id(&self, id: CategoryId) -> BudgetResult<Category> {
        self.db.category_by_id(id)
    }
}

impl ExpenseStore for Storage {
    fn list_expenses(&self) -> BudgetResult<Vec<Expense>> {
        self.db.list_expenses()
    }

    fn expense_by_id(&self, id: ExpenseId) -> BudgetResult<Expense> {
        self.db.expense_by_id(id)
    }
}
