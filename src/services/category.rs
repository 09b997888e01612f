//! Category service
//!
//! Keyword categorization of expenses plus management of the category
//! registry. Every mutation is saved and audited immediately.

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::audit::{Action, Subject};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, CategoryRegistry, Ledger};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The full registry in registry order
    pub fn list(&self) -> LedgerResult<CategoryRegistry> {
        self.storage.categories.load()
    }

    /// Get a category by name (case-insensitive)
    pub fn get(&self, name: &str) -> LedgerResult<Category> {
        self.list()?
            .get(name)
            .cloned()
            .ok_or_else(|| LedgerError::category_not_found(name))
    }

    /// Add a new category at the end of the registry
    pub fn add(&self, name: &str, keywords: &[String]) -> LedgerResult<Category> {
        let category = Category::new(name, keywords)?;

        let mut registry = self.list()?;
        registry.insert(category.clone())?;
        self.storage.categories.save(&registry)?;

        self.storage.record(
            Action::Added,
            Subject::Category {
                name: category.name.clone(),
            },
            category.keywords.join(", "),
        );
        info!(category = %category.name, keywords = category.keywords.len(), "added category");

        Ok(category)
    }

    /// Remove a category
    pub fn remove(&self, name: &str) -> LedgerResult<Category> {
        let mut registry = self.list()?;
        let removed = registry.remove(name)?;
        self.storage.categories.save(&registry)?;

        self.storage.record(
            Action::Removed,
            Subject::Category {
                name: removed.name.clone(),
            },
            removed.keywords.join(", "),
        );
        info!(category = %removed.name, "removed category");

        Ok(removed)
    }

    /// Replace a category's keyword list
    pub fn update(&self, name: &str, keywords: &[String]) -> LedgerResult<Category> {
        let mut registry = self.list()?;
        let previous = registry.replace_keywords(name, keywords)?;
        let updated = registry
            .get(name)
            .cloned()
            .ok_or_else(|| LedgerError::category_not_found(name))?;
        self.storage.categories.save(&registry)?;

        self.storage.record(
            Action::Changed,
            Subject::Category {
                name: updated.name.clone(),
            },
            format!("[{}] -> [{}]", previous.join(", "), updated.keywords.join(", ")),
        );
        info!(category = %updated.name, "updated category keywords");

        Ok(updated)
    }

    /// Category name for an expense description
    pub fn categorize(&self, description: &str) -> LedgerResult<String> {
        let registry = self.list()?;
        let category = registry.categorize(description).to_string();
        debug!(description, category = %category, "categorized expense");
        Ok(category)
    }

    /// Total spent per category over `ledger`, in first-seen order
    pub fn category_summary(&self, ledger: &Ledger) -> LedgerResult<IndexMap<String, f64>> {
        let registry = self.list()?;
        Ok(category_totals(&registry, ledger))
    }
}

/// Sum amounts per category, keyed in first-seen order
pub(crate) fn category_totals(registry: &CategoryRegistry, ledger: &Ledger) -> IndexMap<String, f64> {
    let mut totals: IndexMap<String, f64> = IndexMap::new();
    for (_, entry) in ledger.entries() {
        let category = registry.categorize(&entry.expense);
        *totals.entry(category.to_string()).or_default() += entry.amount;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LedgerPaths, Settings};
    use crate::models::ExpenseEntry;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, Settings::default()).unwrap();
        (temp_dir, storage)
    }

    fn keywords(list: &[&str]) -> Vec<String> {
        list.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_defaults_listed_without_file() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        assert_eq!(service.list().unwrap().len(), 8);
        assert_eq!(service.categorize("Lunch").unwrap(), "food");
        assert_eq!(service.categorize("Rent").unwrap(), "miscellaneous");
    }

    #[test]
    fn test_add_persists_and_categorizes() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let category = service.add("Travel", &keywords(&["Flight", "hotel"])).unwrap();
        assert_eq!(category.name, "travel");
        assert!(storage.paths().categories_file().exists());

        assert_eq!(service.categorize("Hotel Booking").unwrap(), "travel");
        assert_eq!(service.list().unwrap().len(), 9);

        let audit = storage.audit().read_recent(10).unwrap();
        assert_eq!(audit.len(), 1);
        assert_eq!(
            audit[0].subject,
            Subject::Category {
                name: "travel".into()
            }
        );
    }

    #[test]
    fn test_add_duplicate() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let err = service.add("Food", &keywords(&["pizza"])).unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateCategory(_)));
        assert!(!storage.paths().categories_file().exists());
    }

    #[test]
    fn test_remove() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        service.remove("health").unwrap();
        assert!(service.get("health").unwrap_err().is_not_found());
        assert!(service.remove("health").unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_replaces_keywords() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let updated = service
            .update("food", &keywords(&["lunch", "dinner", "snacks"]))
            .unwrap();
        assert_eq!(updated.keywords, vec!["lunch", "dinner", "snacks"]);
        assert_eq!(service.categorize("coffee").unwrap(), "miscellaneous");

        assert!(service
            .update("pets", &keywords(&["vet"]))
            .unwrap_err()
            .is_not_found());

        let audit = storage.audit().read_recent(1).unwrap();
        assert_eq!(audit[0].action, Action::Changed);
        assert!(audit[0].summary.ends_with("-> [lunch, dinner, snacks]"));
    }

    #[test]
    fn test_category_summary() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let mut ledger = Ledger::new();
        ledger.add("2025-01-15", ExpenseEntry::new("Lunch", 1500.0));
        ledger.add("2025-01-15", ExpenseEntry::new("Transport", 500.0));
        ledger.add("2025-01-16", ExpenseEntry::new("Coffee", 300.0));

        let summary = service.category_summary(&ledger).unwrap();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary["food"], 1800.0);
        assert_eq!(summary["transport"], 500.0);
    }
}
