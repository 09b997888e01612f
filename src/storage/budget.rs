//! Budget repository for JSON storage
//!
//! Manages loading and saving monthly budgets in budget.json

use std::path::PathBuf;

use crate::backup::BackupManager;
use crate::error::LedgerResult;
use crate::models::Budget;

use super::file_io::{read_json, save_json};

/// Repository for budget persistence
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    path: PathBuf,
    backups: Option<BackupManager>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf, backups: Option<BackupManager>) -> Self {
        Self { path, backups }
    }

    /// Load budgets from disk. A budget that has never tracked a month
    /// starts at `default_month`.
    pub fn load(&self, default_month: &str) -> LedgerResult<Budget> {
        let mut budget: Budget = read_json(&self.path)?;
        if budget.current_month.is_empty() {
            budget.current_month = default_month.to_string();
        }
        Ok(budget)
    }

    /// Save budgets to disk
    pub fn save(&self, budget: &Budget) -> LedgerResult<()> {
        save_json(&self.path, budget, self.backups.as_ref())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
