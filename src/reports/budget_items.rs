//! Budget item projection
//!
//! Joins expenses with their categories, applies the date range and
//! category filter, sorts by date and annotates each row with the running
//! balance.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetFilter, BudgetItem, Money};
use crate::storage::{CategoryStore, ExpenseStore};

/// Project the store contents into balance-annotated budget items
///
/// Expenses whose category is missing from the store are dropped. Items are
/// ordered by date; expenses sharing a date keep the order the store listed
/// them in.
pub fn budget_items<S>(store: &S, filter: &BudgetFilter) -> BudgetResult<Vec<BudgetItem>>
where
    S: CategoryStore + ExpenseStore + ?Sized,
{
    let categories: HashMap<_, _> = store
        .list_categories()?
        .into_iter()
        .map(|c| (c.id, c.description))
        .collect();

    let mut joined: Vec<_> = store
        .list_expenses()?
        .into_iter()
        .filter(|e| filter.includes_date(e.date) && filter.includes_category(e.category_id))
        .filter_map(|e| categories.get(&e.category_id).map(|name| (e, name.clone())))
        .collect();

    joined.sort_by_key(|(e, _)| e.date);

    let mut balance = Money::zero();
    let mut items = Vec::with_capacity(joined.len());
    for (expense, category) in joined {
        balance = balance.checked_add(expense.amount).ok_or_else(|| {
            BudgetError::Overflow(format!("running balance at expense {}", expense.id))
        })?;
        items.push(BudgetItem {
            category_id: expense.category_id,
            expense_id: expense.id,
            date: expense.date,
            category,
            short_description: expense.description,
            amount: expense.amount,
            balance,
        });
    }

    Ok(items)
}

/// Flat list of budget items with running balances
#[derive(Debug, Clone)]
pub struct BudgetItemsReport {
    pub filter: BudgetFilter,
    pub items: Vec<BudgetItem>,
}

impl BudgetItemsReport {
    pub fn generate<S>(store: &S, filter: BudgetFilter) -> BudgetResult<Self>
    where
        S: CategoryStore + ExpenseStore + ?Sized,
    {
        Ok(Self {
            items: budget_items(store, &filter)?,
            filter,
        })
    }

    /// Sum of every item amount (the final balance)
    pub fn total(&self) -> Money {
        self.items.last().map(|i| i.balance).unwrap_or_default()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Budget Items: {} to {}\n",
            self.filter.start_date(),
            self.filter.end_date()
        ));
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<10}  {:<18} {:<22} {:>12} {:>12}\n",
            "Date", "Category", "Description", "Amount", "Balance"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        for item in &self.items {
            output.push_str(&format!(
                "{:<10}  {:<18} {:<22} {:>12} {:>12}\n",
                item.date.format("%Y-%m-%d"),
                super::truncate(&item.category, 18),
                super::truncate(&item.short_description, 22),
                item.amount,
                item.balance
            ));
        }

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{} item(s), balance {}\n",
            self.items.len(),
            self.total()
        ));

        output
    }

    /// Export the report as CSV
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> BudgetResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Date", "Category", "Description", "Amount", "Balance"])?;

        for item in &self.items {
            csv.write_record([
                item.date.format("%Y-%m-%d").to_string(),
                item.category.clone(),
                item.short_description.clone(),
                item.amount.to_decimal_string(),
                item.balance.to_decimal_string(),
            ])?;
        }

        csv.flush().map_err(|e| BudgetError::Export(e.to_string()))
    }
}
