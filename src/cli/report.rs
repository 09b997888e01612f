//! Report CLI commands
//!
//! Summaries, statistics and CSV export.

use std::path::PathBuf;

use clap::Subcommand;
use serde::Serialize;

use crate::display::{format_comprehensive_stats, format_monthly_stats, format_summary};
use crate::error::{LedgerError, LedgerResult};
use crate::export::export_ledger_csv_file;
use crate::services::{AnalyticsService, CategoryService, ExpenseService};
use crate::storage::Storage;

/// Report commands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Total spending, optionally within a date range
    Summary {
        /// Start of a date range
        #[arg(long, requires = "end")]
        start: Option<String>,
        /// End of a date range
        #[arg(long, requires = "start")]
        end: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Spending statistics, all-time or for one month
    Stats {
        /// Month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Export the ledger with categories to CSV
    Export {
        /// Output file, default ledger_export_<timestamp>.csv
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a report command
pub fn handle_report_command(storage: &Storage, cmd: ReportCommands) -> LedgerResult<()> {
    let symbol = storage.settings().currency_symbol.as_str();

    match cmd {
        ReportCommands::Summary { start, end, json } => {
            let expenses = ExpenseService::new(storage);
            let (ledger, period) = match (start, end) {
                (Some(start), Some(end)) => {
                    let period = format!("from {} to {}", start, end);
                    (expenses.by_range(&start, &end)?, period)
                }
                _ => (expenses.all()?, "for all time".to_string()),
            };
            let summary = AnalyticsService::summary_stats(&ledger, &period);

            if json {
                print_json(&summary)?;
            } else {
                print!("{}", format_summary(&summary, symbol));
            }
        }

        ReportCommands::Stats { month, json } => {
            let analytics = AnalyticsService::new(storage);
            match month {
                Some(month) => {
                    let stats = analytics.monthly_stats(&month)?;
                    if json {
                        print_json(&stats)?;
                    } else {
                        print!("{}", format_monthly_stats(&stats, symbol));
                    }
                }
                None => {
                    let stats = analytics.comprehensive_stats()?;
                    if json {
                        print_json(&stats)?;
                    } else {
                        print!("{}", format_comprehensive_stats(&stats, symbol));
                    }
                }
            }
        }

        ReportCommands::Export { output } => {
            let path = output.unwrap_or_else(|| {
                let stamp = storage.clock().now().format("%Y%m%d_%H%M%S");
                PathBuf::from(format!("ledger_export_{}.csv", stamp))
            });

            let ledger = ExpenseService::new(storage).all()?;
            let registry = CategoryService::new(storage).list()?;
            let rows = export_ledger_csv_file(&ledger, &registry, &path)?;
            println!("Exported {} expense(s) to {}", rows, path.display());
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> LedgerResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| LedgerError::Export(format!("cannot serialize report: {}", e)))?;
    println!("{}", json);
    Ok(())
}
