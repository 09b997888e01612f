//! Backup manager for QuickLedger
//!
//! Every save copies the previous version of a data file into the backup
//! directory as `{stem}_backup_{YYYYMMDD_HHMMSS_mmm}.json`, then prunes that
//! stem's backups down to the configured count.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, Local, NaiveDateTime};
use serde::Serialize;

use crate::config::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};

/// Metadata about a backup
#[derive(Debug, Clone, Serialize)]
pub struct BackupInfo {
    /// Stem of the data file this backs up ("ledger", "categories", ...)
    pub stem: String,
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// When the backup was taken, local time
    pub created_at: NaiveDateTime,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Manages backup creation and retention
#[derive(Debug, Clone)]
pub struct BackupManager {
    /// Path to backup directory
    backup_dir: PathBuf,
    /// Backups kept per data file
    max_backups: usize,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(paths: &LedgerPaths, max_backups: usize) -> Self {
        Self {
            backup_dir: paths.backup_dir(),
            max_backups,
        }
    }

    /// Copy `file` into the backup directory.
    ///
    /// Returns `None` when there is nothing to back up yet.
    pub fn backup_file(&self, file: &Path) -> LedgerResult<Option<PathBuf>> {
        if !file.exists() {
            return Ok(None);
        }

        let stem = file_stem(file)?;
        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            LedgerError::StorageUnavailable(format!("Failed to create backup directory: {}", e))
        })?;

        let now = Local::now();
        let filename = format!(
            "{}_backup_{}_{:03}.json",
            stem,
            now.format("%Y%m%d_%H%M%S"),
            now.timestamp_subsec_millis().min(999)
        );
        let backup_path = self.backup_dir.join(filename);

        fs::copy(file, &backup_path).map_err(|e| {
            LedgerError::StorageUnavailable(format!(
                "Failed to back up {}: {}",
                file.display(),
                e
            ))
        })?;

        Ok(Some(backup_path))
    }

    /// Back up `file`, then prune its older backups
    pub fn backup_with_retention(&self, file: &Path) -> LedgerResult<Option<PathBuf>> {
        let backup = self.backup_file(file)?;
        if backup.is_some() {
            self.enforce_retention(&file_stem(file)?)?;
        }
        Ok(backup)
    }

    /// List backups for one data file, newest first
    pub fn list_backups(&self, stem: &str) -> LedgerResult<Vec<BackupInfo>> {
        let mut backups: Vec<_> = self
            .list_all()?
            .into_iter()
            .filter(|b| b.stem == stem)
            .collect();
        backups.sort_by(|a, b| b.filename.cmp(&a.filename));
        Ok(backups)
    }

    /// List every backup in the directory, newest first
    pub fn list_all(&self) -> LedgerResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir).map_err(|e| {
            LedgerError::StorageUnavailable(format!("Failed to read backup directory: {}", e))
        })? {
            let entry = entry.map_err(|e| {
                LedgerError::StorageUnavailable(format!("Failed to read directory entry: {}", e))
            })?;

            if let Some(info) = parse_backup_info(&entry.path()) {
                backups.push(info);
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(backups)
    }

    /// Delete all but the newest `max_backups` backups of one data file
    pub fn enforce_retention(&self, stem: &str) -> LedgerResult<Vec<PathBuf>> {
        let mut deleted = Vec::new();

        for backup in self.list_backups(stem)?.into_iter().skip(self.max_backups) {
            fs::remove_file(&backup.path).map_err(|e| {
                LedgerError::StorageUnavailable(format!("Failed to delete old backup: {}", e))
            })?;
            deleted.push(backup.path);
        }

        Ok(deleted)
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }

    pub fn max_backups(&self) -> usize {
        self.max_backups
    }
}

fn file_stem(file: &Path) -> LedgerResult<String> {
    file.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .ok_or_else(|| {
            LedgerError::StorageUnavailable(format!("Not a data file: {}", file.display()))
        })
}

fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let (stem, rest) = filename.strip_suffix(".json")?.split_once("_backup_")?;
    let created_at = parse_backup_timestamp(rest)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        stem: stem.to_string(),
        filename: filename.clone(),
        path: path.to_path_buf(),
        created_at,
        size_bytes,
    })
}

/// Parse `YYYYMMDD_HHMMSS` with an optional `_mmm` millisecond suffix
fn parse_backup_timestamp(value: &str) -> Option<NaiveDateTime> {
    let (seconds, millis) = match value.len() {
        15 => (value, 0),
        19 => (value.get(..15)?, value.get(16..)?.parse::<i64>().ok()?),
        _ => return None,
    };

    let base = NaiveDateTime::parse_from_str(seconds, "%Y%m%d_%H%M%S").ok()?;
    Some(base + Duration::milliseconds(millis))
}
