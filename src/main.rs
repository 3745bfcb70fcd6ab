use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use home_budget::cli::{
    handle_audit_command, handle_category_command, handle_expense_command, handle_export_command,
    handle_report_command,
};
use home_budget::config::{BudgetPaths, Settings};
use home_budget::models::DEFAULT_CATEGORIES;
use home_budget::storage::Storage;

#[derive(Parser)]
#[command(
    name = "homebudget",
    version,
    about = "Personal finance record-keeper",
    long_about = "HomeBudget records categorized expenses in a SQLite database and \
                  reports on them by date, by month, by category, and as a \
                  category-by-month summary."
)]
struct Cli {
    /// Database file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database with the default categories
    Init {
        /// Recreate the database, discarding existing data
        #[arg(long)]
        force: bool,
    },

    /// Category management commands
    #[command(subcommand)]
    Category(home_budget::cli::CategoryCommands),

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(home_budget::cli::ExpenseCommands),

    /// Budget reports
    #[command(subcommand)]
    Report(home_budget::cli::ReportCommands),

    /// Export all data
    #[command(subcommand)]
    Export(home_budget::cli::ExportCommands),

    /// Show recent changes from the audit log
    Audit(home_budget::cli::AuditArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let db = cli.db.as_deref();

    match cli.command {
        Some(Commands::Init { force }) => {
            let database = settings.database_path(&paths, db);
            println!("Initializing HomeBudget at: {}", database.display());
            let storage = Storage::open(&paths, &settings, db, force)?;
            settings.save(&paths)?;
            let count = storage.categories().count()?;
            storage.close()?;

            println!("Initialization complete!");
            println!();
            if force || count == DEFAULT_CATEGORIES.len() {
                println!("The {} default categories have been created.", DEFAULT_CATEGORIES.len());
            } else {
                println!("Existing database kept ({} categories).", count);
            }
            println!("Run 'homebudget category list' to see all categories.");
        }
        Some(Commands::Category(cmd)) => {
            let storage = Storage::open(&paths, &settings, db, false)?;
            handle_category_command(&storage, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            let storage = Storage::open(&paths, &settings, db, false)?;
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            let storage = Storage::open(&paths, &settings, db, false)?;
            handle_report_command(&storage, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            let storage = Storage::open(&paths, &settings, db, false)?;
            handle_export_command(&storage, cmd)?;
        }
        Some(Commands::Audit(args)) => {
            let storage = Storage::open(&paths, &settings, db, false)?;
            handle_audit_command(&storage, args)?;
        }
        Some(Commands::Config) => {
            println!("HomeBudget Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Database file:    {}", settings.database_path(&paths, db).display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!("Initialized:      {}", if paths.is_initialized() { "yes" } else { "no" });
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Audit enabled:   {}", settings.audit_enabled);
        }
        None => {
            println!("HomeBudget - personal finance record-keeper");
            println!();
            println!("Run 'homebudget --help' for usage information.");
            println!("Run 'homebudget init' to create a budget.");
        }
    }

    Ok(())
}
