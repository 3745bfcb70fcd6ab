//! Expense service
//!
//! Validated, audited expense changes on top of the expense repository.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{BudgetError, BudgetResult};
use crate::models::expense::validate_description;
use crate::models::{CategoryId, Expense, ExpenseId, Money};
use crate::storage::Storage;

/// Fields to change on an existing expense; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct ExpenseChanges {
    pub date: Option<NaiveDate>,
    pub category_id: Option<CategoryId>,
    pub amount: Option<Money>,
    pub description: Option<String>,
}

impl ExpenseChanges {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.category_id.is_none()
            && self.amount.is_none()
            && self.description.is_none()
    }
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new expense
    ///
    /// The category must exist.
    pub fn add(
        &self,
        date: NaiveDate,
        category_id: CategoryId,
        amount: Money,
        description: &str,
    ) -> BudgetResult<Expense> {
        let description = description.trim();
        validate_description(description).map_err(|e| BudgetError::Validation(e.to_string()))?;
        self.storage.categories().get_by_id(category_id)?;

        let expense = self
            .storage
            .expenses()
            .add(date, category_id, amount, description)?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    pub fn get(&self, id: ExpenseId) -> BudgetResult<Expense> {
        self.storage.expenses().get_by_id(id)
    }

    /// All expenses in id order
    pub fn list(&self) -> BudgetResult<Vec<Expense>> {
        self.storage.expenses().list()
    }

    pub fn list_by_category(&self, category_id: CategoryId) -> BudgetResult<Vec<Expense>> {
        self.storage.expenses().list_by_category(category_id)
    }

    /// Apply changes to an existing expense
    pub fn update(&self, id: ExpenseId, changes: ExpenseChanges) -> BudgetResult<Expense> {
        let before = self.get(id)?;
        let mut expense = before.clone();

        if let Some(date) = changes.date {
            expense.date = date;
        }
        if let Some(category_id) = changes.category_id {
            self.storage.categories().get_by_id(category_id)?;
            expense.category_id = category_id;
        }
        if let Some(amount) = changes.amount {
            expense.amount = amount;
        }
        if let Some(description) = changes.description {
            expense.description = description.trim().to_string();
        }

        expense
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.expenses().update(&expense)?;

        self.storage.log_update(
            EntityType::Expense,
            id.to_string(),
            Some(expense.description.clone()),
            &before,
            &expense,
        )?;

        Ok(expense)
    }

    /// Delete an expense; unknown ids are ignored and return `false`
    pub fn delete(&self, id: ExpenseId) -> BudgetResult<bool> {
        let Some(expense) = self.storage.expenses().find(id)? else {
            return Ok(false);
        };

        self.storage.expenses().delete(id)?;
        self.storage.log_delete(
            EntityType::Expense,
            id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditLogger, Operation};
    use crate::storage::Database;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn audited_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        let storage = Storage::new(Database::open_in_memory().unwrap(), Some(logger));
        (temp_dir, storage)
    }

    #[test]
    fn test_add_expense() {
        let (_temp, storage) = audited_storage();
        let service = ExpenseService::new(&storage);

        let expense = service
            .add(date(2020, 1, 5), CategoryId::new(3), Money::from_cents(-2000), " lunch ")
            .unwrap();
        assert_eq!(expense.description, "lunch");
        assert_eq!(service.get(expense.id).unwrap(), expense);

        let entries = storage.audit().unwrap().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entity_type, EntityType::Expense);
    }

    #[test]
    fn test_add_with_unknown_category() {
        let (_temp, storage) = audited_storage();
        let err = ExpenseService::new(&storage)
            .add(date(2020, 1, 5), CategoryId::new(99), Money::from_cents(-1), "x")
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_add_rejects_long_description() {
        let (_temp, storage) = audited_storage();
        let err = ExpenseService::new(&storage)
            .add(date(2020, 1, 5), CategoryId::new(3), Money::zero(), &"x".repeat(501))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_update_expense() {
        let (_temp, storage) = audited_storage();
        let service = ExpenseService::new(&storage);
        let expense = service
            .add(date(2020, 1, 5), CategoryId::new(3), Money::from_cents(-2000), "lunch")
            .unwrap();

        let updated = service
            .update(
                expense.id,
                ExpenseChanges {
                    amount: Some(Money::from_cents(-2500)),
                    category_id: Some(CategoryId::new(14)),
                    ..ExpenseChanges::default()
                },
            )
            .unwrap();

        assert_eq!(updated.amount, Money::from_cents(-2500));
        assert_eq!(updated.category_id, CategoryId::new(14));
        assert_eq!(updated.description, "lunch");
        assert_eq!(service.get(expense.id).unwrap(), updated);

        let history = storage
            .audit()
            .unwrap()
            .read_for_entity(EntityType::Expense, &expense.id.to_string())
            .unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].operation, Operation::Update);
        assert!(history[1].diff_summary.as_deref().unwrap().contains("amount"));
    }

    #[test]
    fn test_update_to_unknown_category_fails() {
        let (_temp, storage) = audited_storage();
        let service = ExpenseService::new(&storage);
        let expense = service
            .add(date(2020, 1, 5), CategoryId::new(3), Money::from_cents(-2000), "lunch")
            .unwrap();

        let err = service
            .update(
                expense.id,
                ExpenseChanges {
                    category_id: Some(CategoryId::new(99)),
                    ..ExpenseChanges::default()
                },
            )
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(service.get(expense.id).unwrap().category_id, CategoryId::new(3));
    }

    #[test]
    fn test_delete_expense() {
        let (_temp, storage) = audited_storage();
        let service = ExpenseService::new(&storage);
        let expense = service
            .add(date(2020, 1, 5), CategoryId::new(3), Money::from_cents(-2000), "lunch")
            .unwrap();

        assert!(service.delete(expense.id).unwrap());
        assert!(!service.delete(expense.id).unwrap());
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_changes_is_empty() {
        assert!(ExpenseChanges::default().is_empty());
        let changes = ExpenseChanges {
            description: Some("x".into()),
            ..ExpenseChanges::default()
        };
        assert!(!changes.is_empty());
    }
}
