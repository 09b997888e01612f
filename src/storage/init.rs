//! Storage initialization
//!
//! Handles first-run setup: directories, settings and the default categories.

use crate::config::{LedgerPaths, Settings};
use crate::error::LedgerResult;
use crate::models::{CategoryRegistry, Ledger};

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing files are left untouched. Returns whether anything was created.
pub fn initialize_storage(paths: &LedgerPaths, settings: &Settings) -> LedgerResult<bool> {
    paths.ensure_directories()?;
    let mut created = false;

    if !paths.settings_file().exists() {
        settings.save(paths)?;
        created = true;
    }

    if !paths.categories_file().exists() {
        write_json_atomic(paths.categories_file(), &CategoryRegistry::defaults())?;
        created = true;
    }

    if !paths.ledger_file().exists() {
        write_json_atomic(paths.ledger_file(), &Ledger::new())?;
        created = true;
    }

    Ok(created)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &LedgerPaths) -> bool {
    !paths.is_initialized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::storage::file_io::read_json;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));
        assert!(initialize_storage(&paths, &Settings::default()).unwrap());

        assert!(!needs_initialization(&paths));
        assert!(paths.settings_file().exists());
        assert!(paths.backup_dir().exists());

        let registry: CategoryRegistry = read_json(paths.categories_file()).unwrap();
        assert_eq!(registry, CategoryRegistry::defaults());
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths, &Settings::default()).unwrap();

        let mut custom = CategoryRegistry::new();
        custom
            .insert(Category::new("pets", ["vet"]).unwrap())
            .unwrap();
        write_json_atomic(paths.categories_file(), &custom).unwrap();

        assert!(!initialize_storage(&paths, &Settings::default()).unwrap());

        let registry: CategoryRegistry = read_json(paths.categories_file()).unwrap();
        assert_eq!(registry, custom);
    }
}
