//! Service layer for HomeBudget
//!
//! Validation and audit logging on top of the storage repositories.

pub mod category;
pub mod expense;

pub use category::CategoryService;
pub use expense::{ExpenseChanges, ExpenseService};
