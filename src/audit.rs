//! Change journal
//!
//! Each saved mutation appends one JSON line to `audit.log`: what happened,
//! to which expense date, category or budget month, and a short summary.
//! The journal is a trail for `ledger audit`, not a source of truth; the
//! data files are never rebuilt from it.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::LedgerResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Added,
    Changed,
    Removed,
}

/// What a journal record is about, keyed the way the data files key it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Subject {
    Expense { date: String },
    Category { name: String },
    Budget { month: String },
    /// Bulk changes to the whole ledger
    Ledger,
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense { date } => write!(f, "expense on {}", date),
            Self::Category { name } => write!(f, "category {}", name),
            Self::Budget { month } => write!(f, "budget for {}", month),
            Self::Ledger => f.write_str("ledger"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub at: DateTime<Utc>,
    pub action: Action,
    pub subject: Subject,
    pub summary: String,
}

impl AuditRecord {
    pub fn new(action: Action, subject: Subject, summary: impl Into<String>) -> Self {
        Self {
            at: Utc::now(),
            action,
            subject,
            summary: summary.into(),
        }
    }
}

impl fmt::Display for AuditRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.action {
            Action::Added => "added",
            Action::Changed => "changed",
            Action::Removed => "removed",
        };
        write!(
            f,
            "[{}] {} {}: {}",
            self.at.format("%Y-%m-%d %H:%M:%S UTC"),
            verb,
            self.subject,
            self.summary
        )
    }
}

/// Append-only JSONL journal
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn append(&self, record: &AuditRecord) -> LedgerResult<()> {
        let line = serde_json::to_string(record)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    /// The last `count` records, oldest first. Lines that do not parse are
    /// skipped.
    pub fn read_recent(&self, count: usize) -> LedgerResult<Vec<AuditRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        let mut records: Vec<AuditRecord> = contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str(line) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable audit line");
                    None
                }
            })
            .collect();

        let start = records.len().saturating_sub(count);
        Ok(records.split_off(start))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
