//! Ledger repository for JSON storage
//!
//! Manages loading and saving the date-keyed expenses in ledger.json

use std::path::PathBuf;

use crate::backup::BackupManager;
use crate::error::LedgerResult;
use crate::models::Ledger;

use super::file_io::{read_json, save_json};

/// Repository for ledger persistence
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    path: PathBuf,
    backups: Option<BackupManager>,
}

impl LedgerRepository {
    /// Create a new ledger repository. Saves back up the previous file when
    /// `backups` is given.
    pub fn new(path: PathBuf, backups: Option<BackupManager>) -> Self {
        Self { path, backups }
    }

    /// Load the ledger from disk; an absent file is an empty ledger
    pub fn load(&self) -> LedgerResult<Ledger> {
        read_json(&self.path)
    }

    /// Save the ledger to disk
    pub fn save(&self, ledger: &Ledger) -> LedgerResult<()> {
        save_json(&self.path, ledger, self.backups.as_ref())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseEntry;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let repo = LedgerRepository::new(temp_dir.path().join("ledger.json"), None);
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_load_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        std::fs::write(
            &path,
            r#"{"2025-01-16":[{"expense":"Coffee","amount":300.0}],"2025-01-15":[{"expense":"Lunch","amount":1500.0},{"expense":"Transport","amount":500.0}]}"#,
        )
        .unwrap();

        let repo = LedgerRepository::new(path.clone(), None);
        repo.save(&repo.load().unwrap()).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();

        repo.save(&repo.load().unwrap()).unwrap();
        let second = std::fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
        let keys: Vec<_> = repo
            .load()
            .unwrap()
            .days()
            .map(|(d, _)| d.to_string())
            .collect();
        assert_eq!(keys, vec!["2025-01-16", "2025-01-15"]);
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let repo = LedgerRepository::new(temp_dir.path().join("ledger.json"), None);

        let mut ledger = Ledger::new();
        ledger.add("2025-01-15", ExpenseEntry::new("Lunch", 1500.0));
        repo.save(&ledger).unwrap();

        assert_eq!(repo.load().unwrap(), ledger);
    }
}
