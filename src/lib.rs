//! HomeBudget - personal finance record-keeping
//!
//! This library stores categorized expenses in SQLite and derives four
//! read-only views from them: a date-ordered list of budget items with a
//! running balance, the same items grouped by month, grouped by category,
//! and a category-by-month pivot ending in a `TOTALS` record.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Categories, expenses and the report rows built from them
//! - `storage`: Store traits, the SQLite database and an in-memory snapshot
//! - `reports`: The four report projections with text and CSV output
//! - `budget`: The `HomeBudget` facade
//! - `services`: Validated, audited category and expense changes
//! - `audit`: Audit logging system
//! - `export`: JSON and YAML snapshots
//! - `display`: Table formatting for the CLI
//! - `cli`: Command handlers for the `homebudget` binary
//!
//! # Example
//!
//! ```rust
//! use home_budget::HomeBudget;
//! use home_budget::models::CategoryId;
//!
//! let budget = HomeBudget::in_memory()?;
//! let items = budget.get_budget_items(None, None, false, CategoryId::new(0))?;
//! assert!(items.is_empty());
//! # Ok::<(), home_budget::BudgetError>(())
//! ```

pub mod audit;
pub mod budget;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use budget::HomeBudget;
pub use error::{BudgetError, BudgetResult};
