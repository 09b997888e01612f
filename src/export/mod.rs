//! Export module for QuickLedger
//!
//! CSV export of the ledger with each expense's resolved category.

pub mod csv;

pub use self::csv::{export_ledger_csv, export_ledger_csv_file};
