//! Data directory CLI commands
//!
//! First-run setup, backup listing, data file overview and the audit log.

use clap::Subcommand;

use crate::display::{format_audit_log, format_backup_list, format_info};
use crate::error::LedgerResult;
use crate::storage::{initialize_storage, Storage};

/// Data directory commands
#[derive(Subcommand)]
pub enum DataCommands {
    /// Create the data directory with default categories
    Init,

    /// List backups of the data files
    Backups {
        /// Only backups of this file ("ledger", "categories", "budget")
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Show data file locations and sizes
    Info,

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Handle a data directory command
pub fn handle_data_command(storage: &Storage, cmd: DataCommands) -> LedgerResult<()> {
    match cmd {
        DataCommands::Init => {
            let paths = storage.paths();
            println!("Initializing ledger at: {}", paths.base_dir().display());
            if initialize_storage(paths, storage.settings())? {
                println!("Default categories have been created.");
                println!("Run 'ledger category list' to see them.");
            } else {
                println!("Already initialized; nothing to do.");
            }
        }

        DataCommands::Backups { file } => {
            let backups = match file {
                Some(stem) => storage.backups().list_backups(&stem)?,
                None => storage.backups().list_all()?,
            };
            print!("{}", format_backup_list(&backups));
        }

        DataCommands::Info => {
            let backups = storage.backups();
            let count = backups.list_all()?.len();
            print!("{}", format_info(storage.paths(), count, backups.max_backups()));
            if !storage.is_initialized() {
                println!("No ledger yet. Run 'ledger init' or add an expense.");
            }
        }

        DataCommands::Audit { limit } => {
            let entries = storage.audit().read_recent(limit)?;
            print!("{}", format_audit_log(&entries));
        }
    }

    Ok(())
}
