//! User settings for QuickLedger
//!
//! Manages backup policy, the budget rollover policy, and display preferences.
//! Settings are read from `config.json` and may be overridden by environment
//! variables.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;

/// Which monthly budget supplies the amount carried into a new month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RolloverSource {
    /// The most recently inserted monthly budget, whatever its month
    #[default]
    LastInserted,
    /// The chronologically latest month
    LatestMonth,
}

/// User settings for QuickLedger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Number of backups kept per data file
    #[serde(default = "default_max_backups")]
    pub max_backups: usize,

    /// Whether every save first backs up the previous file
    #[serde(default = "default_auto_backup")]
    pub auto_backup: bool,

    /// Budget rollover amount source
    #[serde(default)]
    pub rollover_source: RolloverSource,

    /// Currency symbol used for display only
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_max_backups() -> usize {
    10
}

fn default_auto_backup() -> bool {
    true
}

fn default_currency() -> String {
    "₦".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            max_backups: default_max_backups(),
            auto_backup: default_auto_backup(),
            rollover_source: RolloverSource::default(),
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist.
    ///
    /// Environment overrides (`LEDGER_MAX_BACKUPS`, `LEDGER_AUTO_BACKUP`) are
    /// applied on top of whatever was loaded.
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        let mut settings = if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                LedgerError::StorageUnavailable(format!("Failed to read settings file: {}", e))
            })?;

            serde_json::from_str(&contents).map_err(|e| {
                LedgerError::Config(format!("Failed to parse settings file: {}", e))
            })?
        } else {
            Settings::default()
        };

        settings.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production)
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), LedgerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("LEDGER_MAX_BACKUPS") {
            self.max_backups = raw.trim().parse().map_err(|_| {
                LedgerError::Config(format!("LEDGER_MAX_BACKUPS must be a number, got '{}'", raw))
            })?;
        }

        if let Some(raw) = lookup("LEDGER_AUTO_BACKUP") {
            self.auto_backup = raw.trim().eq_ignore_ascii_case("true");
        }

        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            LedgerError::StorageUnavailable(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
