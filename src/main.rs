use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use quickledger::cli::{
    handle_budget_command, handle_category_command, handle_data_command, handle_expense_command,
    handle_report_command, BudgetCommands, CategoryCommands, DataCommands, ExpenseCommands,
    ReportCommands,
};
use quickledger::config::{LedgerPaths, Settings};
use quickledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Personal expense ledger with categories, budgets and analytics",
    long_about = "QuickLedger records daily expenses, sorts them into categories by \
                  keyword, tracks monthly budgets and reports where the money went. \
                  Data lives in ~/.ledger unless LEDGER_DATA_DIR is set."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    #[command(flatten)]
    Report(ReportCommands),

    #[command(flatten)]
    Data(DataCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Monthly budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths, settings)?;

    match cli.command {
        Commands::Expense(cmd) => handle_expense_command(&storage, cmd)?,
        Commands::Report(cmd) => handle_report_command(&storage, cmd)?,
        Commands::Data(cmd) => handle_data_command(&storage, cmd)?,
        Commands::Category(cmd) => handle_category_command(&storage, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(&storage, cmd)?,
    }

    Ok(())
}
