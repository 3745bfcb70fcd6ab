//! Budget reports
//!
//! Every report is computed from the current contents of a category store
//! and an expense store plus a [`BudgetFilter`](crate::models::BudgetFilter).
//! Nothing is cached between calls.
//!
//! - [`budget_items`]: filtered, date-ordered items with running balances
//! - [`budget_items_by_month`]: items grouped by "YYYY-MM"
//! - [`budget_items_by_category`]: items grouped by category description
//! - [`budget_dictionary_by_category_and_month`]: the category-by-month pivot

pub mod budget_items;
pub mod by_category;
pub mod by_month;
pub mod category_month;

pub use budget_items::{budget_items, BudgetItemsReport};
pub use by_category::{budget_items_by_category, group_by_category, CategoryReport};
pub use by_month::{budget_items_by_month, group_by_month, MonthlyReport};
pub use category_month::{
    budget_dictionary_by_category_and_month, pivot_by_category_and_month, CategoryMonthReport,
};

/// Shorten text to fit a fixed-width column
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let head: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
