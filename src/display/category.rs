//! Category display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Category;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Type")]
    category_type: String,
}

/// Format categories as a table, in the order given
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'homebudget init' to create the default categories."
            .to_string();
    }

    let rows = categories.iter().map(|c| CategoryRow {
        id: c.id.value(),
        description: c.description.clone(),
        category_type: c.category_type.to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Format a single category with its usage count
pub fn format_category_details(category: &Category, expense_count: usize) -> String {
    format!(
        "Category: {}\n  ID:       {}\n  Type:     {}\n  Expenses: {}\n",
        category.description,
        category.id.value(),
        category.category_type,
        expense_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, CategoryType};

    #[test]
    fn test_empty_list() {
        assert!(format_category_list(&[]).starts_with("No categories found."));
    }

    #[test]
    fn test_list_has_header_and_rows() {
        let categories = vec![
            Category::new(CategoryId::new(1), "Utilities", CategoryType::Expense),
            Category::new(CategoryId::new(16), "Income", CategoryType::Income),
        ];
        let text = format_category_list(&categories);

        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].contains("ID") && lines[0].contains("Description"));
        assert!(lines.iter().any(|l| l.contains("Utilities") && l.contains("Expense")));
        assert!(lines.iter().any(|l| l.contains("16") && l.contains("Income")));
    }

    #[test]
    fn test_details() {
        let category = Category::new(CategoryId::new(9), "Credit Card", CategoryType::Credit);
        let text = format_category_details(&category, 4);
        assert!(text.contains("Credit Card"));
        assert!(text.contains("Type:     Credit"));
        assert!(text.contains("Expenses: 4"));
    }
}
