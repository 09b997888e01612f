//! Expense CLI commands
//!
//! Top-level commands for recording, viewing, editing and deleting
//! expenses.

use clap::Subcommand;

use crate::display::{format_day, format_ledger, format_money};
use crate::error::LedgerResult;
use crate::models::ExpenseRef;
use crate::services::{AnalyticsService, ExpenseService};
use crate::storage::Storage;

/// Expense commands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// What the money was spent on
        expense: String,
        /// Amount spent
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Date of the expense (YYYY-MM-DD), default today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// View expenses for a day, the past week, or a date range
    View {
        /// Date to view (YYYY-MM-DD), default today
        #[arg(short, long, conflicts_with_all = ["week", "start"])]
        date: Option<String>,
        /// Show the 7 days ending today
        #[arg(short, long, conflicts_with = "start")]
        week: bool,
        /// Start of a date range
        #[arg(long, requires = "end")]
        start: Option<String>,
        /// End of a date range
        #[arg(long, requires = "start")]
        end: Option<String>,
    },

    /// Edit an expense by position or name within its date
    Edit {
        /// Date of the expense (YYYY-MM-DD)
        date: String,
        /// Position within the date (0-based) or expense name
        id: ExpenseRef,
        /// New name
        #[arg(short, long)]
        expense: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<f64>,
    },

    /// Delete an expense by position or name within its date
    Delete {
        /// Date of the expense (YYYY-MM-DD)
        date: String,
        /// Position within the date (0-based) or expense name
        id: ExpenseRef,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete every expense
    Clear {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle an expense command
pub fn handle_expense_command(storage: &Storage, cmd: ExpenseCommands) -> LedgerResult<()> {
    let service = ExpenseService::new(storage);
    let symbol = storage.settings().currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            expense,
            amount,
            date,
        } => {
            let added = service.add(&expense, amount, date.as_deref())?;
            println!(
                "Added {} ({}) on {}",
                added.name,
                format_money(added.amount, symbol),
                added.date_key()
            );
        }

        ExpenseCommands::View {
            date,
            week,
            start,
            end,
        } => {
            if week {
                let ledger = service.by_week()?;
                print!("{}", format_ledger("Expenses for the past week", &ledger, symbol));
            } else if let (Some(start), Some(end)) = (start, end) {
                let ledger = service.by_range(&start, &end)?;
                let title = format!("Expenses from {} to {}", start, end);
                print!("{}", format_ledger(&title, &ledger, symbol));

                let summary = AnalyticsService::summary_stats(&ledger, &title);
                if summary.days_with_expenses > 0 {
                    println!(
                        "Days with expenses: {}  Transactions: {}  Average per day: {}",
                        summary.days_with_expenses,
                        summary.transaction_count,
                        format_money(summary.total / summary.days_with_expenses as f64, symbol)
                    );
                }
            } else {
                let date = date.unwrap_or_else(|| storage.clock().today_key());
                let entries = service.by_date(&date)?;
                print!("{}", format_day(&date, &entries, symbol));
            }
        }

        ExpenseCommands::Edit {
            date,
            id,
            expense,
            amount,
        } => {
            let updated = service.update(&date, &id, expense.as_deref(), amount)?;
            println!(
                "Updated expense on {}: {} ({})",
                date,
                updated.expense,
                format_money(updated.amount, symbol)
            );
        }

        ExpenseCommands::Delete { date, id, yes } => {
            if !yes {
                println!("This will delete expense {} on {}.", id, date);
                println!("Re-run with --yes to confirm.");
                return Ok(());
            }
            let removed = service.delete(&date, &id)?;
            println!(
                "Deleted {} ({}) from {}",
                removed.expense,
                format_money(removed.amount, symbol),
                date
            );
        }

        ExpenseCommands::Clear { yes } => {
            if !yes {
                println!("This will delete every expense in the ledger.");
                println!("Re-run with --yes to confirm.");
                return Ok(());
            }
            let removed = service.delete_all()?;
            println!("Cleared {} expense(s).", removed);
        }
    }

    Ok(())
}
