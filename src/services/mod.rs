//! Service layer for QuickLedger
//!
//! Business logic on top of the storage layer: validation, categorization,
//! budget rollover and analytics.

pub mod analytics;
pub mod budget;
pub mod category;
pub mod expense;

pub use analytics::AnalyticsService;
pub use budget::BudgetService;
pub use category::CategoryService;
pub use expense::ExpenseService;
