//! Category repository for JSON storage
//!
//! Manages loading and saving the category registry in categories.json

use std::path::PathBuf;

use crate::backup::BackupManager;
use crate::error::LedgerResult;
use crate::models::CategoryRegistry;

use super::file_io::{read_json, save_json};

/// Repository for category persistence
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    path: PathBuf,
    backups: Option<BackupManager>,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf, backups: Option<BackupManager>) -> Self {
        Self { path, backups }
    }

    /// Load the registry. An absent or empty file yields the default
    /// categories; they are written on the first save.
    pub fn load(&self) -> LedgerResult<CategoryRegistry> {
        let registry: CategoryRegistry = read_json(&self.path)?;
        if registry.is_empty() {
            return Ok(CategoryRegistry::defaults());
        }
        Ok(registry)
    }

    /// Save the registry to disk
    pub fn save(&self, registry: &CategoryRegistry) -> LedgerResult<()> {
        save_json(&self.path, registry, self.backups.as_ref())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_absent_or_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("categories.json");
        let repo = CategoryRepository::new(path.clone(), None);

        assert_eq!(repo.load().unwrap(), CategoryRegistry::defaults());
        assert!(!path.exists());

        std::fs::write(&path, "{}").unwrap();
        assert_eq!(repo.load().unwrap().len(), 8);
    }

    #[test]
    fn test_custom_registry_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let repo = CategoryRepository::new(temp_dir.path().join("categories.json"), None);

        let mut registry = CategoryRegistry::new();
        registry
            .insert(Category::new("pets", ["vet", "dog food"]).unwrap())
            .unwrap();
        repo.save(&registry).unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded, registry);
        assert_eq!(loaded.categorize("Vet"), "pets");
    }
}
