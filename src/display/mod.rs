//! Display formatting for terminal output
//!
//! Plain-text blocks and `tabled` tables for expenses, statistics, budgets,
//! categories, backups and the audit log. Amounts carry the configured
//! currency symbol.

pub mod budget;
pub mod category;
pub mod expense;
pub mod format;
pub mod stats;
pub mod storage;

pub use budget::{format_budget_history, format_budget_status, BudgetHealth};
pub use category::{format_category_details, format_category_summary, format_category_tree};
pub use expense::{format_day, format_ledger, format_summary};
pub use format::format_money;
pub use stats::{format_comprehensive_stats, format_monthly_stats};
pub use storage::{format_audit_log, format_backup_list, format_info};
