//! Category model and the keyword-matching registry
//!
//! Categories classify expenses by keyword. The registry keeps categories in
//! declaration order, which is the tie-break when several categories match.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LedgerError, LedgerResult};

/// The fallback category. It has no keywords of its own.
pub const MISCELLANEOUS: &str = "miscellaneous";

/// A named set of keywords
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Lowercase, unique within a registry
    pub name: String,

    /// Lowercase keywords matched against expense descriptions
    pub keywords: Vec<String>,
}

impl Category {
    /// Create a category, normalizing the name and keywords to lowercase.
    /// Blank keywords are dropped.
    pub fn new<I, S>(name: &str, keywords: I) -> LedgerResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return Err(LedgerError::Validation("Category name cannot be empty".into()));
        }

        Ok(Self {
            name,
            keywords: normalize_keywords(keywords),
        })
    }

    fn matches_exactly(&self, description: &str) -> bool {
        self.keywords.iter().any(|k| k == description)
    }

    fn matches_within(&self, description: &str) -> bool {
        self.keywords.iter().any(|k| description.contains(k.as_str()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn normalize_keywords<I, S>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keywords
        .into_iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// Ordered collection of categories, keyed by lowercase name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "IndexMap<String, Vec<String>>",
    into = "IndexMap<String, Vec<String>>"
)]
pub struct CategoryRegistry {
    categories: IndexMap<String, Category>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The eight categories a new ledger starts with
    pub fn defaults() -> Self {
        let mut registry = Self::new();
        for (name, keywords) in DEFAULT_CATEGORIES {
            registry.categories.insert(
                name.to_string(),
                Category {
                    name: name.to_string(),
                    keywords: keywords.iter().map(|k| k.to_string()).collect(),
                },
            );
        }
        registry
    }

    /// Map an expense description to a category name.
    ///
    /// An exact keyword match anywhere in the registry beats a substring
    /// match. Within each pass the first category in registry order wins.
    pub fn categorize(&self, description: &str) -> &str {
        let description = description.trim().to_lowercase();

        self.categories
            .values()
            .find(|c| c.matches_exactly(&description))
            .or_else(|| {
                self.categories
                    .values()
                    .find(|c| c.matches_within(&description))
            })
            .map(|c| c.name.as_str())
            .unwrap_or(MISCELLANEOUS)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.get(&name.trim().to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Categories in registry order
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    /// Add a new category at the end of the registry
    pub fn insert(&mut self, category: Category) -> LedgerResult<()> {
        if self.categories.contains_key(&category.name) {
            return Err(LedgerError::DuplicateCategory(category.name));
        }
        self.categories.insert(category.name.clone(), category);
        Ok(())
    }

    /// Remove a category, keeping the order of the rest
    ///
    /// The fallback category cannot be removed, so `categorize` always
    /// names a category that is in the registry.
    pub fn remove(&mut self, name: &str) -> LedgerResult<Category> {
        let key = name.trim().to_lowercase();
        if key == MISCELLANEOUS {
            return Err(LedgerError::Validation(format!(
                "'{}' is the fallback category and cannot be removed",
                MISCELLANEOUS
            )));
        }
        self.categories
            .shift_remove(&key)
            .ok_or_else(|| LedgerError::category_not_found(name))
    }

    /// Replace a category's keywords. Returns the previous list.
    pub fn replace_keywords<I, S>(&mut self, name: &str, keywords: I) -> LedgerResult<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let category = self
            .categories
            .get_mut(&name.trim().to_lowercase())
            .ok_or_else(|| LedgerError::category_not_found(name))?;

        Ok(std::mem::replace(
            &mut category.keywords,
            normalize_keywords(keywords),
        ))
    }
}

impl TryFrom<IndexMap<String, Vec<String>>> for CategoryRegistry {
    type Error = LedgerError;

    fn try_from(raw: IndexMap<String, Vec<String>>) -> Result<Self, Self::Error> {
        let mut registry = Self::new();
        for (name, keywords) in raw {
            registry.insert(Category::new(&name, keywords)?)?;
        }
        Ok(registry)
    }
}

impl From<CategoryRegistry> for IndexMap<String, Vec<String>> {
    fn from(registry: CategoryRegistry) -> Self {
        registry
            .categories
            .into_iter()
            .map(|(name, category)| (name, category.keywords))
            .collect()
    }
}

const DEFAULT_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "food",
        &[
            "food", "lunch", "dinner", "breakfast", "brunch", "snacks", "groceries",
            "restaurant", "bread", "rice", "moi-moi", "soup", "fish", "milk", "pear", "ice",
            "water", "drink", "juice", "tea", "coffee", "groundnut", "meal",
        ],
    ),
    (
        "transport",
        &["transport", "fuel", "taxi", "bus", "train", "uber"],
    ),
    (
        "utilities",
        &["utilities", "electricity", "water", "internet", "phone", "gas"],
    ),
    (
        "entertainment",
        &["entertainment", "movie", "games", "music", "books", "streaming"],
    ),
    (
        "health",
        &["health", "medicine", "doctor", "hospital", "pharmacy", "fitness"],
    ),
    (
        "shopping",
        &["shopping", "clothes", "electronics", "household", "gifts"],
    ),
    (
        "education",
        &["education", "books", "courses", "tuition", "training", "textbook"],
    ),
    (MISCELLANEOUS, &[]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let registry = CategoryRegistry::defaults();
        let names: Vec<_> = registry.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "food",
                "transport",
                "utilities",
                "entertainment",
                "health",
                "shopping",
                "education",
                "miscellaneous"
            ]
        );
        assert!(registry.get(MISCELLANEOUS).unwrap().keywords.is_empty());
    }

    #[test]
    fn test_categorize_defaults() {
        let registry = CategoryRegistry::defaults();
        assert_eq!(registry.categorize("Lunch"), "food");
        assert_eq!(registry.categorize("  COFFEE "), "food");
        assert_eq!(registry.categorize("Transport"), "transport");
        assert_eq!(registry.categorize("Uber To Work"), "transport");
        assert_eq!(registry.categorize("Rent"), MISCELLANEOUS);
        assert_eq!(registry.categorize(""), MISCELLANEOUS);
    }

    #[test]
    fn test_registry_order_breaks_ties() {
        let registry = CategoryRegistry::defaults();
        // "water" is a keyword of both food and utilities
        assert_eq!(registry.categorize("water"), "food");
        // "books" is a keyword of both entertainment and education
        assert_eq!(registry.categorize("books"), "entertainment");
    }

    #[test]
    fn test_exact_match_beats_substring() {
        let mut registry = CategoryRegistry::new();
        registry
            .insert(Category::new("drinks", ["tea"]).unwrap())
            .unwrap();
        registry
            .insert(Category::new("travel", ["steam train"]).unwrap())
            .unwrap();

        // "steam train" contains "tea" but is an exact keyword of travel
        assert_eq!(registry.categorize("Steam Train"), "travel");
        assert_eq!(registry.categorize("green tea"), "drinks");
    }

    #[test]
    fn test_result_is_always_known() {
        let registry = CategoryRegistry::defaults();
        for name in ["Fuel", "Gift Box", "Zzz", "Doctor Visit", "123"] {
            let category = registry.categorize(name);
            assert!(registry.contains(category));
        }
    }

    #[test]
    fn test_new_normalizes() {
        let category = Category::new("  Pets ", ["Dog Food", " ", "VET"]).unwrap();
        assert_eq!(category.name, "pets");
        assert_eq!(category.keywords, vec!["dog food", "vet"]);

        assert!(Category::new("  ", ["x"]).is_err());
    }

    #[test]
    fn test_insert_duplicate_is_case_insensitive() {
        let mut registry = CategoryRegistry::defaults();
        let err = registry
            .insert(Category::new("FOOD", ["pizza"]).unwrap())
            .unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateCategory(name) if name == "food"));
    }

    #[test]
    fn test_remove_and_replace() {
        let mut registry = CategoryRegistry::defaults();

        let removed = registry.remove("Health").unwrap();
        assert_eq!(removed.name, "health");
        assert!(registry.remove("health").unwrap_err().is_not_found());
        assert_eq!(registry.categorize("doctor"), MISCELLANEOUS);

        let err = registry.remove(" Miscellaneous ").unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
        assert!(registry.get(MISCELLANEOUS).is_some());
        assert_eq!(registry.categorize("unicorn"), MISCELLANEOUS);

        let previous = registry.replace_keywords("transport", ["Okada"]).unwrap();
        assert!(previous.contains(&"taxi".to_string()));
        assert_eq!(registry.categorize("okada"), "transport");
        assert_eq!(registry.categorize("taxi"), MISCELLANEOUS);

        assert!(registry
            .replace_keywords("pets", ["dog"])
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_serde_shape() {
        let json = r#"{"Food":["Lunch"],"misc":[]}"#;
        let registry: CategoryRegistry = serde_json::from_str(json).unwrap();
        assert_eq!(registry.get("food").unwrap().keywords, vec!["lunch"]);
        assert_eq!(
            serde_json::to_string(&registry).unwrap(),
            r#"{"food":["lunch"],"misc":[]}"#
        );
    }
}
