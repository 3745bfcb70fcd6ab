//! Budget items grouped by calendar month

use std::collections::HashMap;
use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetFilter, BudgetItem, BudgetItemsByMonth, Money};
use crate::storage::{CategoryStore, ExpenseStore};

use super::budget_items::budget_items;

/// Group items by "YYYY-MM" in order of first appearance
///
/// Items are already date-sorted, so this is chronological order.
pub fn group_by_month(items: Vec<BudgetItem>) -> BudgetResult<Vec<BudgetItemsByMonth>> {
    let mut months: Vec<BudgetItemsByMonth> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in items {
        let key = item.month_key();
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            months.push(BudgetItemsByMonth {
                month: key,
                details: Vec::new(),
                total: Money::zero(),
            });
            months.len() - 1
        });

        let group = &mut months[slot];
        group.total = group
            .total
            .checked_add(item.amount)
            .ok_or_else(|| BudgetError::Overflow(format!("total for month {}", group.month)))?;
        group.details.push(item);
    }

    Ok(months)
}

/// Budget items for the filter, grouped by month
pub fn budget_items_by_month<S>(
    store: &S,
    filter: &BudgetFilter,
) -> BudgetResult<Vec<BudgetItemsByMonth>>
where
    S: CategoryStore + ExpenseStore + ?Sized,
{
    group_by_month(budget_items(store, filter)?)
}

/// Monthly totals report
#[derive(Debug, Clone)]
pub struct MonthlyReport {
    pub filter: BudgetFilter,
    pub months: Vec<BudgetItemsByMonth>,
}

impl MonthlyReport {
    pub fn generate<S>(store: &S, filter: BudgetFilter) -> BudgetResult<Self>
    where
        S: CategoryStore + ExpenseStore + ?Sized,
    {
        Ok(Self {
            months: budget_items_by_month(store, &filter)?,
            filter,
        })
    }

    pub fn grand_total(&self) -> Money {
        Money::checked_sum(self.months.iter().map(|m| m.total)).unwrap_or_default()
    }

    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Budget by Month: {} to {}\n",
            self.filter.start_date(),
            self.filter.end_date()
        ));
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!("{:<10} {:>14} {:>8}\n", "Month", "Total", "Items"));
        output.push_str(&"-".repeat(40));
        output.push('\n');

        for month in &self.months {
            output.push_str(&format!(
                "{:<10} {:>14} {:>8}\n",
                month.month,
                month.total,
                month.details.len()
            ));
        }

        output.push_str(&"-".repeat(40));
        output.push('\n');
        output.push_str(&format!("{:<10} {:>14}\n", "TOTAL", self.grand_total()));

        output
    }

    pub fn export_csv<W: Write>(&self, writer: &mut W) -> BudgetResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Month", "Total", "Items"])?;

        for month in &self.months {
            csv.write_record([
                month.month.clone(),
                month.total.to_decimal_string(),
                month.details.len().to_string(),
            ])?;
        }

        csv.flush().map_err(|e| BudgetError::Export(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, Expense, ExpenseId};
    use crate::reports::fixtures::{date, scenario};

    #[test]
    fn test_scenario_months() {
        let months = budget_items_by_month(&scenario(), &BudgetFilter::all()).unwrap();

        assert_eq!(months.len(), 2);
        assert_eq!(months[0].month, "2020-01");
        assert_eq!(months[0].total, Money::from_cents(48000));
        assert_eq!(months[0].details.len(), 2);
        assert_eq!(months[1].month, "2020-02");
        assert_eq!(months[1].total, Money::from_cents(-1500));
    }

    #[test]
    fn test_details_keep_projected_balances() {
        let months = budget_items_by_month(&scenario(), &BudgetFilter::all()).unwrap();
        assert_eq!(months[1].details[0].balance, Money::from_cents(46500));
    }

    #[test]
    fn test_same_month_in_different_years_stay_apart() {
        let mut store = scenario();
        store.push_expense(Expense::new(
            ExpenseId::new(4),
            date(2021, 1, 3),
            CategoryId::new(1),
            Money::from_cents(-100),
            "",
        ));

        let months = budget_items_by_month(&store, &BudgetFilter::all()).unwrap();
        let keys: Vec<_> = months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(keys, vec!["2020-01", "2020-02", "2021-01"]);
    }

    #[test]
    fn test_empty() {
        let filter = BudgetFilter::between(date(2019, 1, 1), date(2019, 12, 31));
        let report = MonthlyReport::generate(&scenario(), filter).unwrap();
        assert!(report.months.is_empty());
        assert!(report.grand_total().is_zero());
    }

    #[test]
    fn test_export_csv() {
        let report = MonthlyReport::generate(&scenario(), BudgetFilter::all()).unwrap();
        let mut out = Vec::new();
        report.export_csv(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Month,Total,Items\n2020-01,480.00,2\n2020-02,-15.00,1\n"
        );
    }

    #[test]
    fn test_format_terminal() {
        let report = MonthlyReport::generate(&scenario(), BudgetFilter::all()).unwrap();
        let text = report.format_terminal();
        assert!(text.contains("2020-01"));
        assert!(text.contains("$465.00"));
    }
}
