//! Backup system for QuickLedger
//!
//! Rolling per-file backups taken before each save.
//!
//! # Backup Format
//!
//! A backup is a byte-for-byte copy of the previous data file, named
//! `{stem}_backup_{YYYYMMDD_HHMMSS_mmm}.json` inside `backups/`.
//!
//! # Retention Policy
//!
//! The newest `max_backups` (default 10) backups of each data file are kept.

mod manager;

pub use manager::{BackupInfo, BackupManager};
