//! Storage layer for QuickLedger
//!
//! One JSON document per concern (ledger, categories, budget) with atomic
//! writes and backup-on-write. Nothing is cached: repositories read their
//! file on every call.

pub mod budget;
pub mod categories;
pub mod file_io;
pub mod init;
pub mod ledger;

pub use budget::BudgetRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, needs_initialization};
pub use ledger::LedgerRepository;

use tracing::warn;

use crate::audit::{Action, AuditLog, AuditRecord, Subject};
use crate::backup::BackupManager;
use crate::clock::Clock;
use crate::config::{LedgerPaths, Settings};
use crate::error::LedgerResult;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: LedgerPaths,
    settings: Settings,
    clock: Clock,
    backups: BackupManager,
    audit: AuditLog,
    pub ledger: LedgerRepository,
    pub categories: CategoryRepository,
    pub budget: BudgetRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: LedgerPaths, settings: Settings) -> LedgerResult<Self> {
        paths.ensure_directories()?;

        let backups = BackupManager::new(&paths, settings.max_backups);
        let on_write = settings.auto_backup.then(|| backups.clone());

        Ok(Self {
            ledger: LedgerRepository::new(paths.ledger_file(), on_write.clone()),
            categories: CategoryRepository::new(paths.categories_file(), on_write.clone()),
            budget: BudgetRepository::new(paths.budget_file(), on_write),
            audit: AuditLog::new(paths.audit_log()),
            clock: Clock::System,
            backups,
            settings,
            paths,
        })
    }

    /// Use a different source for "today"
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }

    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Journal a change that has already been saved. A journal failure is
    /// logged and swallowed: the data files stay authoritative.
    pub fn record(&self, action: Action, subject: Subject, summary: impl Into<String>) {
        let record = AuditRecord::new(action, subject, summary);
        if let Err(e) = self.audit.append(&record) {
            warn!(error = %e, subject = %record.subject, "could not write audit record");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseEntry;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().join("data"));
        let storage = Storage::new(paths, Settings::default()).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(temp_dir.path().join("data").join("backups").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_auto_backup_off_skips_backups() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            auto_backup: false,
            ..Settings::default()
        };
        let storage = Storage::new(paths, settings).unwrap();

        let mut ledger = storage.ledger.load().unwrap();
        ledger.add("2025-01-15", ExpenseEntry::new("Lunch", 1.0));
        storage.ledger.save(&ledger).unwrap();
        storage.ledger.save(&ledger).unwrap();

        assert!(storage.backups().list_all().unwrap().is_empty());
    }

    #[test]
    fn test_backups_respect_retention() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            max_backups: 1,
            ..Settings::default()
        };
        let storage = Storage::new(paths, settings).unwrap();

        let ledger = storage.ledger.load().unwrap();
        for _ in 0..3 {
            storage.ledger.save(&ledger).unwrap();
        }

        assert_eq!(storage.backups().list_backups("ledger").unwrap().len(), 1);
    }
}
