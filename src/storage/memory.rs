//! In-memory store
//!
//! Holds categories and expenses as plain vectors. Used for imported
//! snapshots and for exercising the reports without a database.

use serde::{Deserialize, Serialize};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Category, CategoryId, Expense, ExpenseId};

use super::{CategoryStore, ExpenseStore};

/// Categories and expenses held in memory, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStore {
    pub categories: Vec<Category>,
    pub expenses: Vec<Expense>,
}

impl MemoryStore {
    pub fn new(categories: Vec<Category>, expenses: Vec<Expense>) -> Self {
        Self {
            categories,
            expenses,
        }
    }

    /// Copy everything out of another store
    pub fn snapshot<S: CategoryStore + ExpenseStore>(store: &S) -> BudgetResult<Self> {
        Ok(Self {
            categories: store.list_categories()?,
            expenses: store.list_expenses()?,
        })
    }

    pub fn push_category(&mut self, category: Category) -> &mut Self {
        self.categories.push(category);
        self
    }

    pub fn push_expense(&mut self, expense: Expense) -> &mut Self {
        self.expenses.push(expense);
        self
    }
}

impl CategoryStore for MemoryStore {
    fn list_categories(&self) -> BudgetResult<Vec<Category>> {
        Ok(self.categories.clone())
    }

    fn category_by_id(&self, id: CategoryId) -> BudgetResult<Category> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| BudgetError::category_not_found(id.to_string()))
    }
}

impl ExpenseStore for MemoryStore {
    fn list_expenses(&self) -> BudgetResult<Vec<Expense>> {
        Ok(self.expenses.clone())
    }

    fn expense_by_id(&self, id: ExpenseId) -> BudgetResult<Expense> {
        self.expenses
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| BudgetError::expense_not_found(id.to_string()))
    }
}
