//! Configuration module for QuickLedger
//!
//! - Data directory resolution
//! - User settings persistence and environment overrides

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::{RolloverSource, Settings};
