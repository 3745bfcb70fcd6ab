//! Audit log CLI command

use clap::Args;

use crate::audit::EntityType;
use crate::cli::expense::parse_category_id;
use crate::display::format_audit_entries;
use crate::error::{BudgetError, BudgetResult};
use crate::models::ExpenseId;
use crate::storage::Storage;

/// Options for `homebudget audit`
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Number of most recent entries to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,

    /// Only show the history of this category (ID)
    #[arg(short, long, conflicts_with = "expense")]
    pub category: Option<String>,

    /// Only show the history of this expense (ID)
    #[arg(short, long)]
    pub expense: Option<String>,
}

/// Print recent audit entries
pub fn handle_audit_command(storage: &Storage, args: AuditArgs) -> BudgetResult<()> {
    let Some(logger) = storage.audit() else {
        println!("Audit logging is disabled in the settings.");
        return Ok(());
    };

    let entries = if let Some(category) = args.category {
        let id = parse_category_id(&category)?;
        logger.read_for_entity(EntityType::Category, &id.to_string())?
    } else if let Some(expense) = args.expense {
        let id: ExpenseId = expense
            .parse()
            .map_err(|_| BudgetError::Validation(format!("Invalid expense ID: {}", expense)))?;
        logger.read_for_entity(EntityType::Expense, &id.to_string())?
    } else {
        logger.read_recent(args.limit)?
    };

    println!("{}", format_audit_entries(&entries).trim_end());
    Ok(())
}
