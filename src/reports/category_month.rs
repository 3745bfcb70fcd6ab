//! Category-by-month pivot
//!
//! One record per month with the month total, each category's total and
//! its items, followed by a `TOTALS` record holding every category's total
//! across the whole range.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::models::pivot::{details_key, TOTALS_MONTH, TOTAL_KEY};
use crate::models::{BudgetFilter, BudgetItemsByMonth, Category, Money, PivotRecord, PivotValue};
use crate::storage::{CategoryStore, ExpenseStore};

use super::by_category::group_by_category;
use super::by_month::budget_items_by_month;

/// Build pivot records from month groups
///
/// `categories` decides the key order of the totals record. Categories with
/// nothing in range are left out of it, and when two categories share a
/// description only the first one listed contributes a key.
pub fn pivot_by_category_and_month(
    months: Vec<BudgetItemsByMonth>,
    categories: &[Category],
) -> BudgetResult<Vec<PivotRecord>> {
    let mut records = Vec::with_capacity(months.len() + 1);
    let mut running: HashMap<String, Money> = HashMap::new();

    for month in months {
        let mut record = PivotRecord::for_month(month.month);
        record.insert(TOTAL_KEY, PivotValue::Amount(month.total));

        for group in group_by_category(month.details)? {
            let total = running.entry(group.category.clone()).or_default();
            *total = total.checked_add(group.total).ok_or_else(|| {
                BudgetError::Overflow(format!("total for category {}", group.category))
            })?;
            record.insert(details_key(&group.category), PivotValue::Details(group.details));
            record.insert(group.category, PivotValue::Amount(group.total));
        }

        records.push(record);
    }

    let mut totals = PivotRecord::for_month(TOTALS_MONTH);
    for category in categories {
        if let Some(total) = running.get(&category.description) {
            totals.try_add(category.description.clone(), PivotValue::Amount(*total));
        }
    }
    records.push(totals);

    Ok(records)
}

/// Pivot records for the filter; always ends with the `TOTALS` record
pub fn budget_dictionary_by_category_and_month<S>(
    store: &S,
    filter: &BudgetFilter,
) -> BudgetResult<Vec<PivotRecord>>
where
    S: CategoryStore + ExpenseStore + ?Sized,
{
    let months = budget_items_by_month(store, filter)?;
    let categories = store.list_categories()?;
    pivot_by_category_and_month(months, &categories)
}

/// Category-by-month report
#[derive(Debug, Clone)]
pub struct CategoryMonthReport {
    pub filter: BudgetFilter,
    pub records: Vec<PivotRecord>,
}

impl CategoryMonthReport {
    pub fn generate<S>(store: &S, filter: BudgetFilter) -> BudgetResult<Self>
    where
        S: CategoryStore + ExpenseStore + ?Sized,
    {
        Ok(Self {
            records: budget_dictionary_by_category_and_month(store, &filter)?,
            filter,
        })
    }

    /// Every category appearing in any record, in first-appearance order
    pub fn category_columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for record in &self.records {
            for (name, _) in record.category_totals() {
                if !columns.iter().any(|c| c == name) {
                    columns.push(name.to_string());
                }
            }
        }
        columns
    }

    /// The trailing totals record
    pub fn totals(&self) -> Option<&PivotRecord> {
        self.records.last().filter(|r| r.is_totals())
    }

    pub fn format_terminal(&self) -> String {
        let columns = self.category_columns();
        let width = 10 + 13 + columns.len() * 13;
        let mut output = String::new();

        output.push_str(&format!(
            "Budget by Category and Month: {} to {}\n",
            self.filter.start_date(),
            self.filter.end_date()
        ));
        output.push_str(&"=".repeat(width));
        output.push('\n');

        output.push_str(&format!("{:<10} {:>12}", "Month", "Total"));
        for column in &columns {
            output.push_str(&format!(" {:>12}", super::truncate(column, 12)));
        }
        output.push('\n');
        output.push_str(&"-".repeat(width));
        output.push('\n');

        for record in &self.records {
            if record.is_totals() {
                output.push_str(&"-".repeat(width));
                output.push('\n');
            }
            let total = record.total().map(|t| t.to_string()).unwrap_or_default();
            output.push_str(&format!("{:<10} {:>12}", record.month().unwrap_or(""), total));
            for column in &columns {
                let cell = record
                    .category_total(column)
                    .map(|m| m.to_string())
                    .unwrap_or_default();
                output.push_str(&format!(" {:>12}", cell));
            }
            output.push('\n');
        }

        output
    }

    /// Export as CSV; the `TOTALS` row has an empty `Total` cell
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> BudgetResult<()> {
        let columns = self.category_columns();
        let mut csv = csv::Writer::from_writer(writer);

        let mut header = vec!["Month".to_string(), "Total".to_string()];
        header.extend(columns.iter().cloned());
        csv.write_record(&header)?;

        for record in &self.records {
            let mut row = vec![
                record.month().unwrap_or_default().to_string(),
                record
                    .total()
                    .map(|t| t.to_decimal_string())
                    .unwrap_or_default(),
            ];
            row.extend(columns.iter().map(|c| {
                record
                    .category_total(c)
                    .map(|m| m.to_decimal_string())
                    .unwrap_or_default()
            }));
            csv.write_record(&row)?;
        }

        csv.flush().map_err(|e| BudgetError::Export(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, CategoryType, Expense, ExpenseId};
    use crate::reports::fixtures::{date, scenario};
    use crate::storage::MemoryStore;

    fn pivot(store: &MemoryStore, filter: BudgetFilter) -> Vec<PivotRecord> {
        budget_dictionary_by_category_and_month(store, &filter).unwrap()
    }

    #[test]
    fn test_scenario_records() {
        let records = pivot(&scenario(), BudgetFilter::all());
        assert_eq!(records.len(), 3);

        let january = &records[0];
        assert_eq!(
            january.keys().collect::<Vec<_>>(),
            vec!["Month", "Total", "details:Food", "Food", "details:Pay", "Pay"]
        );
        assert_eq!(january.month(), Some("2020-01"));
        assert_eq!(january.total(), Some(Money::from_cents(48000)));
        assert_eq!(january.category_total("Food"), Some(Money::from_cents(-2000)));
        assert_eq!(january.category_details("Pay").map(|d| d.len()), Some(1));

        let february = &records[1];
        assert_eq!(february.category_total("Food"), Some(Money::from_cents(-1500)));
        assert!(!february.contains_key("Pay"));
    }

    #[test]
    fn test_scenario_totals_record() {
        let records = pivot(&scenario(), BudgetFilter::all());
        let totals = records.last().unwrap();

        assert!(totals.is_totals());
        assert_eq!(totals.keys().collect::<Vec<_>>(), vec!["Month", "Food", "Pay"]);
        assert_eq!(totals.category_total("Food"), Some(Money::from_cents(-3500)));
        assert_eq!(totals.category_total("Pay"), Some(Money::from_cents(50000)));
        assert_eq!(totals.total(), None);
    }

    #[test]
    fn test_totals_follow_store_category_order() {
        let mut store = scenario();
        store.categories.reverse();

        let records = pivot(&store, BudgetFilter::all());
        let totals = records.last().unwrap();
        assert_eq!(totals.keys().collect::<Vec<_>>(), vec!["Month", "Pay", "Food"]);
    }

    #[test]
    fn test_empty_range_still_has_totals_record() {
        let filter = BudgetFilter::between(date(2021, 1, 1), date(2021, 12, 31));
        let records = pivot(&scenario(), filter);

        assert_eq!(records.len(), 1);
        assert!(records[0].is_totals());
        assert_eq!(records[0].len(), 1);
    }

    #[test]
    fn test_unused_categories_are_skipped() {
        let mut store = scenario();
        store.push_category(Category::new(CategoryId::new(3), "Gifts", CategoryType::Expense));

        let records = pivot(&store, BudgetFilter::all());
        assert!(!records.last().unwrap().contains_key("Gifts"));
    }

    #[test]
    fn test_duplicate_descriptions_first_wins() {
        let mut store = scenario();
        store.push_category(Category::new(CategoryId::new(3), "Food", CategoryType::Expense));
        store.push_expense(Expense::new(
            ExpenseId::new(4),
            date(2020, 2, 2),
            CategoryId::new(3),
            Money::from_cents(-500),
            "",
        ));

        let records = pivot(&store, BudgetFilter::all());
        let totals = records.last().unwrap();
        assert_eq!(totals.keys().filter(|k| *k == "Food").count(), 1);
        assert_eq!(totals.category_total("Food"), Some(Money::from_cents(-4000)));
    }

    #[test]
    fn test_categories_named_like_fixed_keys() {
        let mut store = scenario();
        store.push_category(Category::new(CategoryId::new(3), "Month", CategoryType::Expense));
        store.push_category(Category::new(CategoryId::new(4), "Total", CategoryType::Expense));
        store.push_expense(Expense::new(
            ExpenseId::new(4),
            date(2020, 3, 1),
            CategoryId::new(3),
            Money::from_cents(-700),
            "",
        ));
        store.push_expense(Expense::new(
            ExpenseId::new(5),
            date(2020, 3, 2),
            CategoryId::new(4),
            Money::from_cents(-300),
            "",
        ));

        let records = pivot(&store, BudgetFilter::all());
        assert_eq!(records.len(), 4);

        // Month record: both fixed keys are overwritten in place
        let march = &records[2];
        assert_eq!(
            march.keys().collect::<Vec<_>>(),
            vec!["Month", "Total", "details:Month", "details:Total"]
        );
        assert_eq!(march.get("Month"), Some(&PivotValue::Amount(Money::from_cents(-700))));
        assert_eq!(march.month(), None);
        assert_eq!(march.total(), Some(Money::from_cents(-300)));
        assert_eq!(march.category_details("Month").map(|d| d.len()), Some(1));

        // Totals record: "Month" is already taken, "Total" is free
        let totals = records.last().unwrap();
        assert!(totals.is_totals());
        assert_eq!(totals.keys().collect::<Vec<_>>(), vec!["Month", "Food", "Pay", "Total"]);
        assert_eq!(totals.total(), Some(Money::from_cents(-300)));
    }

    #[test]
    fn test_category_filter() {
        let records = pivot(&scenario(), BudgetFilter::all().with_category(CategoryId::new(2)));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].total(), Some(Money::from_cents(50000)));
        assert_eq!(
            records[1].category_totals().collect::<Vec<_>>(),
            vec![("Pay", Money::from_cents(50000))]
        );
    }

    #[test]
    fn test_export_csv() {
        let report = CategoryMonthReport::generate(&scenario(), BudgetFilter::all()).unwrap();
        assert_eq!(report.category_columns(), vec!["Food", "Pay"]);

        let mut out = Vec::new();
        report.export_csv(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Month,Total,Food,Pay\n\
             2020-01,480.00,-20.00,500.00\n\
             2020-02,-15.00,-15.00,\n\
             TOTALS,,-35.00,500.00\n"
        );
    }

    #[test]
    fn test_format_terminal() {
        let report = CategoryMonthReport::generate(&scenario(), BudgetFilter::all()).unwrap();
        assert!(report.totals().is_some());

        let text = report.format_terminal();
        assert!(text.contains("TOTALS"));
        assert!(text.contains("-$35.00"));
    }
}
