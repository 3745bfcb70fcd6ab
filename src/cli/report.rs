//! CLI commands for reports
//!
//! Each report runs either against the open database or against a JSON
//! snapshot written by `homebudget export json`.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use crate::cli::expense::{parse_category_id, parse_date};
use crate::error::{BudgetError, BudgetResult};
use crate::export::read_snapshot;
use crate::models::{BudgetFilter, CategoryId};
use crate::reports::{BudgetItemsReport, CategoryMonthReport, CategoryReport, MonthlyReport};
use crate::storage::{write_atomic, CategoryStore, ExpenseStore, MemoryStore, Storage};

/// Options shared by every report
#[derive(Args, Debug, Clone)]
pub struct ReportOptions {
    /// First date to include (YYYY-MM-DD)
    #[arg(short, long)]
    pub start: Option<String>,

    /// Last date to include (YYYY-MM-DD)
    #[arg(short, long)]
    pub end: Option<String>,

    /// Only include expenses in this category (ID)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Export to CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read data from a JSON snapshot instead of the database
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

impl ReportOptions {
    fn filter(&self) -> BudgetResult<BudgetFilter> {
        let start = self.start.as_deref().map(parse_date).transpose()?;
        let end = self.end.as_deref().map(parse_date).transpose()?;
        let category = self.category.as_deref().map(parse_category_id).transpose()?;

        Ok(BudgetFilter::new(
            start,
            end,
            category.is_some(),
            category.unwrap_or(CategoryId::new(0)),
        ))
    }
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Every matching expense with a running balance
    #[command(alias = "budget-items")]
    Items(ReportOptions),

    /// Items grouped by month
    Month(ReportOptions),

    /// Items grouped by category
    Category(ReportOptions),

    /// Category totals per month, with a TOTALS row
    #[command(alias = "category-month")]
    Pivot(ReportOptions),
}

#[derive(Debug, Clone, Copy)]
enum ReportKind {
    Items,
    Month,
    Category,
    Pivot,
}

/// Handle report commands
pub fn handle_report_command(storage: &Storage, cmd: ReportCommands) -> BudgetResult<()> {
    let (kind, options) = match cmd {
        ReportCommands::Items(options) => (ReportKind::Items, options),
        ReportCommands::Month(options) => (ReportKind::Month, options),
        ReportCommands::Category(options) => (ReportKind::Category, options),
        ReportCommands::Pivot(options) => (ReportKind::Pivot, options),
    };

    let filter = options.filter()?;

    match &options.snapshot {
        Some(path) => {
            let store = load_snapshot(path)?;
            run_report(&store, kind, filter, options.output.as_deref())
        }
        None => run_report(storage, kind, filter, options.output.as_deref()),
    }
}

fn load_snapshot(path: &Path) -> BudgetResult<MemoryStore> {
    Ok(read_snapshot(path)?.into_store())
}

fn run_report<S>(
    store: &S,
    kind: ReportKind,
    filter: BudgetFilter,
    output: Option<&Path>,
) -> BudgetResult<()>
where
    S: CategoryStore + ExpenseStore + ?Sized,
{
    let mut csv = Vec::new();

    let terminal = match kind {
        ReportKind::Items => {
            let report = BudgetItemsReport::generate(store, filter)?;
            if output.is_some() {
                report.export_csv(&mut csv)?;
            }
            report.format_terminal()
        }
        ReportKind::Month => {
            let report = MonthlyReport::generate(store, filter)?;
            if output.is_some() {
                report.export_csv(&mut csv)?;
            }
            report.format_terminal()
        }
        ReportKind::Category => {
            let report = CategoryReport::generate(store, filter)?;
            if output.is_some() {
                report.export_csv(&mut csv)?;
            }
            report.format_terminal()
        }
        ReportKind::Pivot => {
            let report = CategoryMonthReport::generate(store, filter)?;
            if output.is_some() {
                report.export_csv(&mut csv)?;
            }
            report.format_terminal()
        }
    };

    match output {
        Some(path) => {
            write_atomic(path, &csv).map_err(|e| {
                BudgetError::Export(format!("Failed to write {}: {}", path.display(), e))
            })?;
            println!("Report exported to: {}", path.display());
        }
        None => println!("{}", terminal),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn options() -> ReportOptions {
        ReportOptions {
            start: None,
            end: None,
            category: None,
            output: None,
            snapshot: None,
        }
    }

    #[test]
    fn test_filter_without_category_is_unfiltered() {
        let filter = options().filter().unwrap();
        assert!(!filter.filter_by_category);
        assert_eq!(filter.start, None);
    }

    #[test]
    fn test_filter_with_category_and_dates() {
        let filter = ReportOptions {
            start: Some("2020-01-01".into()),
            end: Some("2020-02-29".into()),
            category: Some("3".into()),
            ..options()
        }
        .filter()
        .unwrap();

        assert!(filter.filter_by_category);
        assert_eq!(filter.category_id, CategoryId::new(3));
        assert_eq!(filter.start, NaiveDate::from_ymd_opt(2020, 1, 1));
        assert_eq!(filter.end, NaiveDate::from_ymd_opt(2020, 2, 29));
    }

    #[test]
    fn test_bad_date_is_validation_error() {
        let err = ReportOptions {
            start: Some("yesterday".into()),
            ..options()
        }
        .filter()
        .unwrap_err();
        assert!(err.is_validation());
    }
}
