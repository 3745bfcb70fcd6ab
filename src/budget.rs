//! The HomeBudget facade
//!
//! Ties an open store to the four report queries and the category and
//! expense services. The caller owns the handle; dropping it (or calling
//! [`HomeBudget::close`]) releases the database.
//!
//! ```rust,no_run
//! use home_budget::HomeBudget;
//! use home_budget::models::CategoryId;
//!
//! let budget = HomeBudget::open("budget.db", false)?;
//! for record in budget.get_budget_dictionary_by_category_and_month(None, None, false, CategoryId::new(0))? {
//!     println!("{:?}", record.month());
//! }
//! # Ok::<(), home_budget::BudgetError>(())
//! ```

use std::path::Path;

use chrono::NaiveDate;

use crate::error::BudgetResult;
use crate::models::{
    BudgetFilter, BudgetItem, BudgetItemsByCategory, BudgetItemsByMonth, CategoryId, PivotRecord,
};
use crate::reports;
use crate::services::{CategoryService, ExpenseService};
use crate::storage::{Database, Storage};

/// An open budget
pub struct HomeBudget {
    storage: Storage,
}

impl HomeBudget {
    /// Open a budget database
    ///
    /// With `create_new`, or when the file does not exist, a new database
    /// seeded with the default categories replaces whatever was there.
    pub fn open(database_file: impl AsRef<Path>, create_new: bool) -> BudgetResult<Self> {
        let db = Database::open_or_create(database_file, create_new)?;
        Ok(Self::with_storage(Storage::new(db, None)))
    }

    /// A throwaway budget with the default categories
    pub fn in_memory() -> BudgetResult<Self> {
        Ok(Self::with_storage(Storage::in_memory()?))
    }

    pub fn with_storage(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Path of the open database file, if any
    pub fn database_path(&self) -> Option<&Path> {
        self.storage.database().path()
    }

    pub fn categories(&self) -> CategoryService<'_> {
        CategoryService::new(&self.storage)
    }

    pub fn expenses(&self) -> ExpenseService<'_> {
        ExpenseService::new(&self.storage)
    }

    /// Expenses in `[start, end]` joined with their category, ordered by
    /// date, each carrying the running balance
    ///
    /// Missing bounds are open. `category_id` only applies when
    /// `filter_by_category` is set.
    pub fn get_budget_items(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        filter_by_category: bool,
        category_id: CategoryId,
    ) -> BudgetResult<Vec<BudgetItem>> {
        let filter = BudgetFilter::new(start, end, filter_by_category, category_id);
        reports::budget_items(&self.storage, &filter)
    }

    /// Budget items grouped by month, in chronological order
    pub fn get_budget_items_by_month(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        filter_by_category: bool,
        category_id: CategoryId,
    ) -> BudgetResult<Vec<BudgetItemsByMonth>> {
        let filter = BudgetFilter::new(start, end, filter_by_category, category_id);
        reports::budget_items_by_month(&self.storage, &filter)
    }

    /// Budget items grouped by category description, alphabetically
    pub fn get_budget_items_by_category(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        filter_by_category: bool,
        category_id: CategoryId,
    ) -> BudgetResult<Vec<BudgetItemsByCategory>> {
        let filter = BudgetFilter::new(start, end, filter_by_category, category_id);
        reports::budget_items_by_category(&self.storage, &filter)
    }

    /// Category-by-month pivot records followed by the `TOTALS` record
    pub fn get_budget_dictionary_by_category_and_month(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        filter_by_category: bool,
        category_id: CategoryId,
    ) -> BudgetResult<Vec<PivotRecord>> {
        let filter = BudgetFilter::new(start, end, filter_by_category, category_id);
        reports::budget_dictionary_by_category_and_month(&self.storage, &filter)
    }

    pub fn close(self) -> BudgetResult<()> {
        self.storage.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryType, Money};
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scenario_budget() -> (HomeBudget, CategoryId, CategoryId) {
        let budget = empty_budget();
        let food = budget.categories().add("Food", CategoryType::Expense).unwrap();
        let pay = budget.categories().add("Pay", CategoryType::Income).unwrap();

        let expenses = budget.expenses();
        expenses
            .add(date(2020, 1, 5), food.id, Money::from_cents(-2000), "lunch")
            .unwrap();
        expenses
            .add(date(2020, 1, 10), pay.id, Money::from_cents(50000), "salary")
            .unwrap();
        expenses
            .add(date(2020, 2, 1), food.id, Money::from_cents(-1500), "dinner")
            .unwrap();

        (budget, food.id, pay.id)
    }

    fn empty_budget() -> HomeBudget {
        let db = Database::open_in_memory_empty().unwrap();
        HomeBudget::with_storage(Storage::new(db, None))
    }

    #[test]
    fn test_scenario_through_facade() {
        let (budget, _, _) = scenario_budget();
        let none = CategoryId::new(0);

        let items = budget.get_budget_items(None, None, false, none).unwrap();
        let balances: Vec<_> = items.iter().map(|i| i.balance.cents()).collect();
        assert_eq!(balances, vec![-2000, 48000, 46500]);

        let months = budget.get_budget_items_by_month(None, None, false, none).unwrap();
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].total, Money::from_cents(48000));
        assert_eq!(months[1].total, Money::from_cents(-1500));

        let categories = budget.get_budget_items_by_category(None, None, false, none).unwrap();
        assert_eq!(categories[0].category, "Food");
        assert_eq!(categories[1].category, "Pay");

        let records = budget
            .get_budget_dictionary_by_category_and_month(None, None, false, none)
            .unwrap();
        let totals = records.last().unwrap();
        assert!(totals.is_totals());
        assert_eq!(totals.category_total("Food"), Some(Money::from_cents(-3500)));
        assert_eq!(totals.category_total("Pay"), Some(Money::from_cents(50000)));
    }

    #[test]
    fn test_filter_by_category() {
        let (budget, food, _) = scenario_budget();
        let items = budget.get_budget_items(None, None, true, food).unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.category == "Food"));
    }

    #[test]
    fn test_single_day_range() {
        let (budget, _, _) = scenario_budget();
        let day = Some(date(2020, 2, 1));
        let items = budget.get_budget_items(day, day, false, CategoryId::new(0)).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].short_description, "dinner");
    }

    #[test]
    fn test_open_file_and_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget.db");

        let budget = HomeBudget::open(&path, true).unwrap();
        assert_eq!(budget.database_path(), Some(path.as_path()));
        budget
            .expenses()
            .add(date(2020, 1, 5), CategoryId::new(3), Money::from_cents(-2000), "lunch")
            .unwrap();
        budget.close().unwrap();

        let reopened = HomeBudget::open(&path, false).unwrap();
        let items = reopened
            .get_budget_items(None, None, false, CategoryId::new(0))
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category, "Food");
    }

    #[test]
    fn test_create_new_discards_data() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget.db");

        let budget = HomeBudget::open(&path, true).unwrap();
        budget
            .expenses()
            .add(date(2020, 1, 5), CategoryId::new(3), Money::from_cents(-2000), "lunch")
            .unwrap();
        budget.close().unwrap();

        let fresh = HomeBudget::open(&path, true).unwrap();
        assert!(fresh
            .get_budget_items(None, None, false, CategoryId::new(0))
            .unwrap()
            .is_empty());
    }
}
