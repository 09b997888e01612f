//! Category display formatting
//!
//! Formats the category registry as a keyword tree, and per-category
//! spending as a table.

use indexmap::IndexMap;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::format::{format_money, format_percentage};
use crate::models::{title_case, Category, CategoryRegistry};

/// Format the registry as a tree of categories and their keywords
pub fn format_category_tree(registry: &CategoryRegistry) -> String {
    if registry.is_empty() {
        return "No categories found.\n\nRun 'ledger init' to create default categories.\n"
            .to_string();
    }

    let mut output = String::new();
    for category in registry.iter() {
        output.push_str(&format!("{}\n", title_case(&category.name)));
        output.push_str(&format!("  └── {}\n", format_keywords(category)));
    }
    output
}

/// One-line view of a single category
pub fn format_category_details(category: &Category) -> String {
    format!(
        "{} ({} keywords): {}\n",
        title_case(&category.name),
        category.keywords.len(),
        format_keywords(category)
    )
}

fn format_keywords(category: &Category) -> String {
    if category.keywords.is_empty() {
        "(fallback, no keywords)".to_string()
    } else {
        category.keywords.join(", ")
    }
}

#[derive(Tabled)]
struct SpendRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Share")]
    share: String,
}

/// Spending per category, largest first, with each category's share
pub fn format_category_summary(totals: &IndexMap<String, f64>, symbol: &str) -> String {
    if totals.is_empty() {
        return "No expenses to summarize.\n".to_string();
    }

    let grand_total: f64 = totals.values().sum();
    let mut sorted: Vec<(&String, &f64)> = totals.iter().collect();
    sorted.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));

    let rows = sorted.into_iter().map(|(name, spent)| SpendRow {
        category: title_case(name),
        spent: format_money(*spent, symbol),
        share: if grand_total > 0.0 {
            format_percentage(spent / grand_total * 100.0)
        } else {
            format_percentage(0.0)
        },
    });

    format!(
        "{}\nTotal: {}\n",
        Table::new(rows).with(Style::rounded()),
        format_money(grand_total, symbol)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_tree() {
        let output = format_category_tree(&CategoryRegistry::defaults());
        assert!(output.starts_with("Food\n"));
        assert!(output.contains("moi-moi"));
        assert!(output.contains("Miscellaneous\n  └── (fallback, no keywords)"));
    }

    #[test]
    fn test_category_details() {
        let category = Category::new("travel", ["flight", "hotel"]).unwrap();
        assert_eq!(
            format_category_details(&category),
            "Travel (2 keywords): flight, hotel\n"
        );
    }

    #[test]
    fn test_category_summary_sorted() {
        let mut totals = IndexMap::new();
        totals.insert("transport".to_string(), 500.0);
        totals.insert("food".to_string(), 1500.0);

        let output = format_category_summary(&totals, "₦");
        let food = output.find("Food").unwrap();
        let transport = output.find("Transport").unwrap();
        assert!(food < transport);
        assert!(output.contains("75.0%"));
        assert!(output.contains("Total: ₦2,000.00"));

        assert!(format_category_summary(&IndexMap::new(), "₦").contains("No expenses"));
    }
}
