//! Expense CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::expense::{format_expense_details, format_expense_list};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{CategoryId, ExpenseId, Money};
use crate::services::{CategoryService, ExpenseChanges, ExpenseService};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// List expenses
    List {
        /// Only expenses in this category (ID)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Record an expense
    Add {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Category ID
        category: String,
        /// Amount (e.g. "-20" or "12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Show a single expense
    Show {
        /// Expense ID
        id: String,
    },

    /// Change fields of an expense
    Update {
        /// Expense ID
        id: String,
        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// New category ID
        #[arg(short, long)]
        category: Option<String>,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> BudgetResult<()> {
    let service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::List { category } => {
            let expenses = match category {
                Some(c) => service.list_by_category(parse_category_id(&c)?)?,
                None => service.list()?,
            };
            let categories = CategoryService::new(storage).list()?;
            print!(
                "{}",
                format_expense_list(&expenses, &categories, &settings.date_format)
            );
        }

        ExpenseCommands::Add {
            date,
            category,
            amount,
            description,
        } => {
            let expense = service.add(
                parse_date(&date)?,
                parse_category_id(&category)?,
                parse_amount(&amount)?,
                &description,
            )?;
            println!(
                "Recorded expense {}: {} on {}",
                expense.id.value(),
                expense.amount.format_with_symbol(&settings.currency_symbol),
                expense.date.format(&settings.date_format)
            );
        }

        ExpenseCommands::Show { id } => {
            let expense = service.get(parse_expense_id(&id)?)?;
            let category = storage.categories().find(expense.category_id)?;
            print!("{}", format_expense_details(&expense, category.as_ref()));
        }

        ExpenseCommands::Update {
            id,
            date,
            category,
            amount,
            description,
        } => {
            let changes = ExpenseChanges {
                date: date.as_deref().map(parse_date).transpose()?,
                category_id: category.as_deref().map(parse_category_id).transpose()?,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                description,
            };

            if changes.is_empty() {
                println!("No changes specified. Use --date, --category, --amount or --description.");
                return Ok(());
            }

            let updated = service.update(parse_expense_id(&id)?, changes)?;
            println!("Updated expense {}", updated.id.value());
        }

        ExpenseCommands::Delete { id } => {
            let id = parse_expense_id(&id)?;
            if service.delete(id)? {
                println!("Deleted expense {}", id.value());
            } else {
                println!("No expense {}; nothing deleted.", id.value());
            }
        }
    }

    Ok(())
}

/// Parse a `YYYY-MM-DD` date argument
pub(crate) fn parse_date(value: &str) -> BudgetResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        BudgetError::Validation(format!("Invalid date: {}. Use YYYY-MM-DD", value))
    })
}

pub(crate) fn parse_category_id(value: &str) -> BudgetResult<CategoryId> {
    value
        .parse()
        .map_err(|_| BudgetError::Validation(format!("Invalid category ID: {}", value)))
}

fn parse_expense_id(value: &str) -> BudgetResult<ExpenseId> {
    value
        .parse()
        .map_err(|_| BudgetError::Validation(format!("Invalid expense ID: {}", value)))
}

fn parse_amount(value: &str) -> BudgetResult<Money> {
    Money::parse(value).map_err(|e| BudgetError::Validation(format!("Invalid amount: {}", e)))
}
