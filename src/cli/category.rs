//! Category CLI commands
//!
//! Implements CLI commands for the keyword category registry.

use clap::Subcommand;

use crate::display::category::{
    format_category_details, format_category_summary, format_category_tree,
};
use crate::error::LedgerResult;
use crate::models::title_case;
use crate::services::{CategoryService, ExpenseService};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories with their keywords
    List,

    /// Add a new category
    Add {
        /// Category name
        name: String,
        /// Comma-separated keywords, e.g. "flight,hotel"
        #[arg(short, long, value_delimiter = ',', required = true)]
        keywords: Vec<String>,
    },

    /// Remove a category
    Remove {
        /// Category name
        name: String,
    },

    /// Replace a category's keywords
    Update {
        /// Category name
        name: String,
        /// Comma-separated keywords
        #[arg(short, long, value_delimiter = ',', required = true)]
        keywords: Vec<String>,
    },

    /// Spending per category, optionally within a date range
    Summary {
        /// Start of a date range
        #[arg(long, requires = "end")]
        start: Option<String>,
        /// End of a date range
        #[arg(long, requires = "start")]
        end: Option<String>,
    },

    /// Show which category an expense description falls into
    Match {
        /// Expense description
        description: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> LedgerResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            let registry = service.list()?;
            print!("{}", format_category_tree(&registry));
        }

        CategoryCommands::Add { name, keywords } => {
            let category = service.add(&name, &keywords)?;
            print!("Added category {}", format_category_details(&category));
        }

        CategoryCommands::Remove { name } => {
            let removed = service.remove(&name)?;
            println!("Removed category: {}", title_case(&removed.name));
        }

        CategoryCommands::Update { name, keywords } => {
            let category = service.update(&name, &keywords)?;
            print!("Updated category {}", format_category_details(&category));
        }

        CategoryCommands::Summary { start, end } => {
            let expenses = ExpenseService::new(storage);
            let ledger = match (start, end) {
                (Some(start), Some(end)) => expenses.by_range(&start, &end)?,
                _ => expenses.all()?,
            };
            let totals = service.category_summary(&ledger)?;
            print!(
                "{}",
                format_category_summary(&totals, &storage.settings().currency_symbol)
            );
        }

        CategoryCommands::Match { description } => {
            let category = service.categorize(&description)?;
            println!("{} -> {}", description, title_case(&category));
        }
    }

    Ok(())
}
