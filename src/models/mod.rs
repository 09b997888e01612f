//! Core data models for QuickLedger
//!
//! Expenses and the date-keyed ledger, keyword categories, and monthly
//! budgets, plus the date/month string helpers they share.

pub mod budget;
pub mod category;
pub mod dates;
pub mod expense;
pub mod ledger;

pub use budget::{Budget, MonthlyBudget, Rollover};
pub use category::{Category, CategoryRegistry, MISCELLANEOUS};
pub use dates::{month_of, normalize_date, parse_date, parse_month};
pub use expense::{title_case, validate_amount, Expense, ExpenseEntry, ExpenseRef};
pub use ledger::Ledger;
