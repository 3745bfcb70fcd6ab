//! Core data models for HomeBudget
//!
//! This module contains the stored entities (categories and expenses) and
//! the derived rows produced by the reports.

pub mod budget_item;
pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod pivot;

pub use budget_item::{month_key, BudgetFilter, BudgetItem, BudgetItemsByCategory, BudgetItemsByMonth};
pub use category::{Category, CategoryType, DEFAULT_CATEGORIES};
pub use expense::Expense;
pub use ids::{CategoryId, ExpenseId};
pub use money::Money;
pub use pivot::{PivotRecord, PivotValue};
