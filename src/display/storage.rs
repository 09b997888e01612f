//! Display of backups, data files and the audit log

use std::path::Path;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::format::format_size;
use crate::audit::AuditRecord;
use crate::backup::BackupInfo;
use crate::config::LedgerPaths;

#[derive(Tabled)]
struct BackupRow {
    #[tabled(rename = "File")]
    stem: String,
    #[tabled(rename = "Backup")]
    filename: String,
    #[tabled(rename = "Created")]
    created_at: String,
    #[tabled(rename = "Size")]
    size: String,
}

/// Backups grouped by data file, newest first within each
pub fn format_backup_list(backups: &[BackupInfo]) -> String {
    if backups.is_empty() {
        return "No backups found.\n".to_string();
    }

    let rows = backups.iter().map(|b| BackupRow {
        stem: b.stem.clone(),
        filename: b.filename.clone(),
        created_at: b.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        size: format_size(b.size_bytes),
    });

    format!(
        "{}\n{} backup(s)\n",
        Table::new(rows).with(Style::rounded()),
        backups.len()
    )
}

/// Data directory overview: file locations, sizes and backup count
pub fn format_info(paths: &LedgerPaths, backup_count: usize, max_backups: usize) -> String {
    let mut output = String::new();
    output.push_str(&format!("Data directory: {}\n", paths.base_dir().display()));
    for (label, path) in [
        ("Ledger", paths.ledger_file()),
        ("Categories", paths.categories_file()),
        ("Budget", paths.budget_file()),
        ("Settings", paths.settings_file()),
        ("Audit log", paths.audit_log()),
    ] {
        output.push_str(&format!("{:<11} {}\n", format!("{}:", label), describe_file(&path)));
    }
    output.push_str(&format!(
        "Backups:    {} in {} (keeping {} per file)\n",
        backup_count,
        paths.backup_dir().display(),
        max_backups
    ));
    output
}

fn describe_file(path: &Path) -> String {
    match std::fs::metadata(path) {
        Ok(meta) => format!("{} ({})", path.display(), format_size(meta.len())),
        Err(_) => format!("{} (missing)", path.display()),
    }
}

/// Audit entries, oldest first
pub fn format_audit_log(entries: &[AuditRecord]) -> String {
    if entries.is_empty() {
        return "No audit entries.\n".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&entry.to_string());
        output.push('\n');
    }
    output
}
