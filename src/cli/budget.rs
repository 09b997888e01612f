//! Budget CLI commands
//!
//! Implements CLI commands for monthly budgets.

use clap::Subcommand;

use crate::display::budget::{format_budget_history, format_budget_status};
use crate::display::format::format_money;
use crate::error::LedgerResult;
use crate::services::BudgetService;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the budget for a month
    Set {
        /// Budget amount
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Month (YYYY-MM), default the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show spending against a month's budget
    Status {
        /// Month (YYYY-MM), default the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show every recorded month
    History,

    /// Turn carrying the previous budget into new months on or off
    #[command(name = "auto-reset")]
    AutoReset {
        /// Enable auto-reset
        #[arg(long, conflicts_with = "disable")]
        enable: bool,
        /// Disable auto-reset
        #[arg(long)]
        disable: bool,
    },

    /// Delete a month's budget
    Delete {
        /// Month (YYYY-MM), default the current month
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(storage: &Storage, cmd: BudgetCommands) -> LedgerResult<()> {
    let service = BudgetService::new(storage);
    let symbol = storage.settings().currency_symbol.as_str();

    match cmd {
        BudgetCommands::Set { amount, month } => {
            let budget = service.set_budget(amount, month.as_deref())?;
            println!(
                "Budget for {} set to {}",
                budget.month,
                format_money(budget.amount, symbol)
            );
            println!("Spent:     {}", format_money(budget.spent, symbol));
            println!("Remaining: {}", format_money(budget.remaining(), symbol));
        }

        BudgetCommands::Status { month } => {
            let budget = service.status(month.as_deref())?;
            print!("{}", format_budget_status(&budget, symbol));
        }

        BudgetCommands::History => {
            let history = service.history()?;
            let auto_reset = service.auto_reset()?;
            print!("{}", format_budget_history(&history, auto_reset, symbol));
        }

        BudgetCommands::AutoReset { enable, disable } => {
            let requested = match (enable, disable) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let enabled = service.toggle_auto_reset(requested)?;
            println!(
                "Budget auto-reset {}",
                if enabled { "enabled" } else { "disabled" }
            );
        }

        BudgetCommands::Delete { month } => {
            let label = month
                .clone()
                .unwrap_or_else(|| storage.clock().current_month());
            if service.delete_month(month.as_deref())? {
                println!("Deleted budget for {}", label);
            } else {
                println!("No budget found for {}", label);
            }
        }
    }

    Ok(())
}
