//! Custom error types for QuickLedger
//!
//! This module defines the error hierarchy for the ledger using thiserror.
//! The CLI layer is responsible for turning these into user-facing messages.

use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Malformed date (YYYY-MM-DD) or month (YYYY-MM) string
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A date range whose start is after its end
    #[error("Invalid range: start date {start} is after end date {end}")]
    InvalidRange { start: String, end: String },

    /// Negative expense or budget amount
    #[error("Invalid amount: {0} (amounts cannot be negative)")]
    InvalidAmount(f64),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A category with this name already exists
    #[error("Category already exists: {0}")]
    DuplicateCategory(String),

    /// The backing store could not be read or written
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::StorageUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::StorageUnavailable(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
