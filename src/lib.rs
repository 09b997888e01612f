//! QuickLedger - personal expense ledger
//!
//! Records dated expenses, sorts them into categories by keyword, tracks
//! monthly budgets with rollover, and computes spending analytics. Data is
//! kept in flat JSON files with rolling backups.
//!
//! # Architecture
//!
//! - `config`: data directory paths and settings
//! - `error`: error taxonomy
//! - `clock`: wall-clock source, pinnable for tests
//! - `models`: expenses, the ledger, categories, budgets
//! - `storage`: JSON file storage layer
//! - `services`: business logic layer
//! - `audit`: change journal read by `ledger audit`
//! - `backup`: rolling backups on every save
//! - `export`: CSV export
//! - `display`, `cli`: terminal front end
//!
//! # Example
//!
//! ```rust,ignore
//! use quickledger::config::{LedgerPaths, Settings};
//! use quickledger::services::ExpenseService;
//! use quickledger::storage::Storage;
//!
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths, settings)?;
//! ExpenseService::new(&storage).add("lunch", 1500.0, None)?;
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
