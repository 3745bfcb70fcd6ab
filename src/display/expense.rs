//! Expense display formatting

use std::collections::HashMap;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{Category, CategoryId, Expense};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

fn category_label(names: &HashMap<CategoryId, &str>, id: CategoryId) -> String {
    names
        .get(&id)
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("(unknown {})", id))
}

/// Format expenses as a table, naming each expense's category
pub fn format_expense_list(expenses: &[Expense], categories: &[Category], date_format: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let names: HashMap<_, _> = categories
        .iter()
        .map(|c| (c.id, c.description.as_str()))
        .collect();

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.value(),
        date: e.date.format(date_format).to_string(),
        category: category_label(&names, e.category_id),
        amount: e.amount.to_string(),
        description: e.description.clone(),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::single(3)).with(Alignment::right()));
    format!("{}\n", table)
}

/// Format a single expense
pub fn format_expense_details(expense: &Expense, category: Option<&Category>) -> String {
    let category = category
        .map(|c| c.description.clone())
        .unwrap_or_else(|| format!("(unknown {})", expense.category_id));

    let mut output = format!("Expense {}\n", expense.id.value());
    output.push_str(&format!("  Date:        {}\n", expense.date.format("%Y-%m-%d")));
    output.push_str(&format!("  Category:    {}\n", category));
    output.push_str(&format!("  Amount:      {}\n", expense.amount));
    if !expense.description.is_empty() {
        output.push_str(&format!("  Description: {}\n", expense.description));
    }
    output
}
