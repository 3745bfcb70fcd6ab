//! Category CLI commands
//!
//! Implements CLI commands for category management.

use clap::Subcommand;

use crate::display::category::{format_category_details, format_category_list};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Category, CategoryType};
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories in id order
    List,

    /// Create a new category
    Add {
        /// Category description
        description: String,
        /// Category type (income, expense, credit, savings)
        #[arg(short, long, default_value = "expense")]
        r#type: String,
    },

    /// Show category details
    Show {
        /// Category description or ID
        category: String,
    },

    /// Edit a category
    Update {
        /// Category description or ID
        category: String,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New type
        #[arg(short, long)]
        r#type: Option<String>,
    },

    /// Delete a category that no expense uses
    Delete {
        /// Category description or ID
        category: String,
    },

    /// Replace all categories with the defaults
    Reset,
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> BudgetResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            let categories = service.list()?;
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Add {
            description,
            r#type,
        } => {
            let category_type = parse_type(&r#type)?;
            let category = service.add(&description, category_type)?;
            println!("Created category: {}", category.description);
            println!("  Type: {}", category.category_type);
            println!("  ID: {}", category.id.value());
        }

        CategoryCommands::Show { category } => {
            let cat = require_category(&service, &category)?;
            let expense_count = storage.expenses().list_by_category(cat.id)?.len();
            print!("{}", format_category_details(&cat, expense_count));
        }

        CategoryCommands::Update {
            category,
            description,
            r#type,
        } => {
            let cat = require_category(&service, &category)?;

            if description.is_none() && r#type.is_none() {
                println!("No changes specified. Use --description or --type.");
                return Ok(());
            }

            let category_type = r#type.as_deref().map(parse_type).transpose()?;
            let updated = service.update(cat.id, description.as_deref(), category_type)?;
            println!("Updated category: {}", updated.description);
        }

        CategoryCommands::Delete { category } => {
            // An unknown id is not an error
            match service.find(&category)? {
                Some(cat) => {
                    service.delete(cat.id)?;
                    println!("Deleted category: {}", cat.description);
                }
                None => println!("No category matching '{}'; nothing deleted.", category),
            }
        }

        CategoryCommands::Reset => {
            let categories = service.reset_to_defaults()?;
            println!("Restored {} default categories.", categories.len());
        }
    }

    Ok(())
}

fn require_category(service: &CategoryService<'_>, identifier: &str) -> BudgetResult<Category> {
    service
        .find(identifier)?
        .ok_or_else(|| BudgetError::category_not_found(identifier))
}

fn parse_type(value: &str) -> BudgetResult<CategoryType> {
    value
        .parse::<CategoryType>()
        .map_err(|e| BudgetError::Validation(e.to_string()))
}
