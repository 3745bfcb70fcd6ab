//! Budget items grouped by category description

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetFilter, BudgetItem, BudgetItemsByCategory, Money};
use crate::storage::{CategoryStore, ExpenseStore};

use super::budget_items::budget_items;

/// Group items by category description, groups sorted ascending by
/// description ignoring case
///
/// Descriptions differing only in case stay separate groups, ordered by
/// their exact bytes. Unlike the monthly grouping this ignores
/// first-appearance order. Items inside a group keep their date order.
pub fn group_by_category(items: Vec<BudgetItem>) -> BudgetResult<Vec<BudgetItemsByCategory>> {
    let mut groups: BTreeMap<(String, String), BudgetItemsByCategory> = BTreeMap::new();

    for item in items {
        let key = (item.category.to_lowercase(), item.category.clone());
        let group = groups.entry(key).or_insert_with(|| BudgetItemsByCategory {
            category: item.category.clone(),
            details: Vec::new(),
            total: Money::zero(),
        });
        group.total = group.total.checked_add(item.amount).ok_or_else(|| {
            BudgetError::Overflow(format!("total for category {}", group.category))
        })?;
        group.details.push(item);
    }

    Ok(groups.into_values().collect())
}

/// Budget items for the filter, grouped by category
pub fn budget_items_by_category<S>(
    store: &S,
    filter: &BudgetFilter,
) -> BudgetResult<Vec<BudgetItemsByCategory>>
where
    S: CategoryStore + ExpenseStore + ?Sized,
{
    group_by_category(budget_items(store, filter)?)
}

/// Category totals report
#[derive(Debug, Clone)]
pub struct CategoryReport {
    pub filter: BudgetFilter,
    pub categories: Vec<BudgetItemsByCategory>,
}

impl CategoryReport {
    pub fn generate<S>(store: &S, filter: BudgetFilter) -> BudgetResult<Self>
    where
        S: CategoryStore + ExpenseStore + ?Sized,
    {
        Ok(Self {
            categories: budget_items_by_category(store, &filter)?,
            filter,
        })
    }

    pub fn grand_total(&self) -> Money {
        Money::checked_sum(self.categories.iter().map(|c| c.total)).unwrap_or_default()
    }

    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Budget by Category: {} to {}\n",
            self.filter.start_date(),
            self.filter.end_date()
        ));
        output.push_str(&"=".repeat(52));
        output.push('\n');
        output.push_str(&format!("{:<26} {:>14} {:>10}\n", "Category", "Total", "Items"));
        output.push_str(&"-".repeat(52));
        output.push('\n');

        for group in &self.categories {
            output.push_str(&format!(
                "{:<26} {:>14} {:>10}\n",
                super::truncate(&group.category, 26),
                group.total,
                group.details.len()
            ));
        }

        output.push_str(&"-".repeat(52));
        output.push('\n');
        output.push_str(&format!("{:<26} {:>14}\n", "TOTAL", self.grand_total()));

        output
    }

    pub fn export_csv<W: Write>(&self, writer: &mut W) -> BudgetResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Category", "Total", "Items"])?;

        for group in &self.categories {
            csv.write_record([
                group.category.clone(),
                group.total.to_decimal_string(),
                group.details.len().to_string(),
            ])?;
        }

        csv.flush().map_err(|e| BudgetError::Export(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryId, CategoryType, Expense, ExpenseId};
    use crate::reports::fixtures::{date, scenario};
    use crate::storage::MemoryStore;

    #[test]
    fn test_scenario_categories_are_alphabetical() {
        let groups = budget_items_by_category(&scenario(), &BudgetFilter::all()).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "Food");
        assert_eq!(groups[0].total, Money::from_cents(-3500));
        assert_eq!(groups[1].category, "Pay");
        assert_eq!(groups[1].total, Money::from_cents(50000));
    }

    #[test]
    fn test_order_ignores_first_appearance() {
        let mut store = scenario();
        store.push_category(Category::new(CategoryId::new(3), "Auto", CategoryType::Expense));
        store.push_expense(Expense::new(
            ExpenseId::new(4),
            date(2020, 3, 1),
            CategoryId::new(3),
            Money::from_cents(-4000),
            "tires",
        ));

        let groups = budget_items_by_category(&store, &BudgetFilter::all()).unwrap();
        let names: Vec<_> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(names, vec!["Auto", "Food", "Pay"]);
    }

    #[test]
    fn test_order_ignores_case() {
        let mut store = scenario();
        store.push_category(Category::new(CategoryId::new(3), "bills", CategoryType::Expense));
        store.push_expense(Expense::new(
            ExpenseId::new(4),
            date(2020, 3, 1),
            CategoryId::new(3),
            Money::from_cents(-100),
            "",
        ));

        let groups = budget_items_by_category(&store, &BudgetFilter::all()).unwrap();
        let names: Vec<_> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(names, vec!["bills", "Food", "Pay"]);
    }

    #[test]
    fn test_lowercase_sorts_by_letter_not_byte() {
        let mut store = MemoryStore::default();
        store.push_category(Category::new(
            CategoryId::new(1),
            "Entertainment",
            CategoryType::Expense,
        ));
        store.push_category(Category::new(CategoryId::new(2), "eating out", CategoryType::Expense));
        store.push_expense(Expense::new(
            ExpenseId::new(1),
            date(2020, 1, 1),
            CategoryId::new(1),
            Money::from_cents(-1500),
            "movie",
        ));
        store.push_expense(Expense::new(
            ExpenseId::new(2),
            date(2020, 1, 2),
            CategoryId::new(2),
            Money::from_cents(-2500),
            "pizza",
        ));

        let groups = budget_items_by_category(&store, &BudgetFilter::all()).unwrap();
        let names: Vec<_> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(names, vec!["eating out", "Entertainment"]);
    }

    #[test]
    fn test_case_variants_stay_separate() {
        let mut store = scenario();
        store.push_category(Category::new(CategoryId::new(3), "food", CategoryType::Expense));
        store.push_expense(Expense::new(
            ExpenseId::new(4),
            date(2020, 3, 1),
            CategoryId::new(3),
            Money::from_cents(-300),
            "snack",
        ));

        let groups = budget_items_by_category(&store, &BudgetFilter::all()).unwrap();
        let names: Vec<_> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(names, vec!["Food", "food", "Pay"]);
        assert_eq!(groups[1].total, Money::from_cents(-300));
    }

    #[test]
    fn test_category_total_overflow_is_an_error() {
        let mut store = scenario();
        let windfall = Money::from_cents(i64::MAX / 2 + 5000);
        store.push_expense(Expense::new(
            ExpenseId::new(4),
            date(2020, 3, 1),
            CategoryId::new(1),
            windfall,
            "windfall",
        ));
        // Pay's refund keeps the running balance in range, Food alone overflows
        store.push_expense(Expense::new(
            ExpenseId::new(5),
            date(2020, 3, 1),
            CategoryId::new(2),
            Money::from_cents(-(i64::MAX / 2)),
            "refund",
        ));
        store.push_expense(Expense::new(
            ExpenseId::new(6),
            date(2020, 3, 2),
            CategoryId::new(1),
            windfall,
            "windfall",
        ));

        let err = budget_items_by_category(&store, &BudgetFilter::all()).unwrap_err();
        assert!(matches!(err, BudgetError::Overflow(msg) if msg.contains("Food")));
    }

    #[test]
    fn test_categories_sharing_a_description_merge() {
        let mut store = scenario();
        store.push_category(Category::new(CategoryId::new(3), "Food", CategoryType::Expense));
        store.push_expense(Expense::new(
            ExpenseId::new(4),
            date(2020, 3, 1),
            CategoryId::new(3),
            Money::from_cents(-500),
            "snack",
        ));

        let groups = budget_items_by_category(&store, &BudgetFilter::all()).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].details.len(), 3);
        assert_eq!(groups[0].total, Money::from_cents(-4000));
    }

    #[test]
    fn test_details_keep_date_order() {
        let groups = budget_items_by_category(&scenario(), &BudgetFilter::all()).unwrap();
        let food: Vec<_> = groups[0]
            .details
            .iter()
            .map(|i| i.short_description.as_str())
            .collect();
        assert_eq!(food, vec!["lunch", "dinner"]);
    }

    #[test]
    fn test_export_csv() {
        let report = CategoryReport::generate(&scenario(), BudgetFilter::all()).unwrap();
        let mut out = Vec::new();
        report.export_csv(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Category,Total,Items\nFood,-35.00,2\nPay,500.00,1\n"
        );
        assert_eq!(report.grand_total(), Money::from_cents(46500));
    }
}
