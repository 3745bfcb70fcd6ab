//! Report row types
//!
//! A `BudgetItem` is one expense joined with its category and annotated with
//! the running balance at that point of the report. Grouped views wrap lists
//! of items with a total.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, ExpenseId};
use super::money::Money;

/// One expense as it appears in a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetItem {
    pub category_id: CategoryId,
    pub expense_id: ExpenseId,
    pub date: NaiveDate,
    /// Description of the joined category
    pub category: String,
    /// Description of the expense
    pub short_description: String,
    pub amount: Money,
    /// Sum of this item's amount and every amount before it in the report
    pub balance: Money,
}

impl BudgetItem {
    /// The "YYYY-MM" key this item is grouped under in monthly views
    pub fn month_key(&self) -> String {
        month_key(self.date)
    }
}

/// Format the year-month grouping key for a date
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Budget items that fall in one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetItemsByMonth {
    /// "YYYY-MM"
    pub month: String,
    pub details: Vec<BudgetItem>,
    pub total: Money,
}

/// Budget items sharing one category description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetItemsByCategory {
    pub category: String,
    pub details: Vec<BudgetItem>,
    pub total: Money,
}

/// Date range and category selection applied to every report
///
/// Missing bounds are open: they resolve to far past / far future dates.
/// `category_id` is only consulted when `filter_by_category` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BudgetFilter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub filter_by_category: bool,
    pub category_id: CategoryId,
}

impl BudgetFilter {
    /// Build a filter from the four report parameters
    pub fn new(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        filter_by_category: bool,
        category_id: CategoryId,
    ) -> Self {
        Self {
            start,
            end,
            filter_by_category,
            category_id,
        }
    }

    /// No date bounds, all categories
    pub fn all() -> Self {
        Self::default()
    }

    /// Inclusive date range, all categories
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    /// Restrict to a single category
    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.filter_by_category = true;
        self.category_id = category_id;
        self
    }

    /// Lower bound with the open-range sentinel applied
    pub fn start_date(&self) -> NaiveDate {
        self.start.unwrap_or_else(range_floor)
    }

    /// Upper bound with the open-range sentinel applied
    pub fn end_date(&self) -> NaiveDate {
        self.end.unwrap_or_else(range_ceiling)
    }

    /// Whether a date lies in the inclusive range
    pub fn includes_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// Whether a category passes the category filter
    pub fn includes_category(&self, category_id: CategoryId) -> bool {
        !self.filter_by_category || self.category_id == category_id
    }
}

fn range_floor() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn range_ceiling() -> NaiveDate {
    NaiveDate::from_ymd_opt(2500, 1, 1).unwrap_or(NaiveDate::MAX)
}
