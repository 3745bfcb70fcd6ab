//! Display formatting for terminal output

pub mod audit;
pub mod category;
pub mod expense;

pub use audit::format_audit_entries;
pub use category::{format_category_details, format_category_list};
pub use expense::{format_expense_details, format_expense_list};
