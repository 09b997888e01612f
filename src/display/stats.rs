//! Analytics display formatting

use indexmap::IndexMap;

use super::format::{format_money, separator};
use crate::models::title_case;
use crate::services::analytics::{ComprehensiveStats, MonthlyStats};

/// All-time statistics
pub fn format_comprehensive_stats(stats: &ComprehensiveStats, symbol: &str) -> String {
    if stats.transaction_count == 0 {
        return "No expenses recorded yet.\n".to_string();
    }

    let mut output = String::new();
    output.push_str("Spending statistics\n");
    output.push_str(&separator(40));
    output.push('\n');
    output.push_str(&format!("Total spent:       {}\n", format_money(stats.total_spent, symbol)));
    output.push_str(&format!("Daily average:     {}\n", format_money(stats.daily_average, symbol)));
    output.push_str(&format!("Transactions:      {}\n", stats.transaction_count));
    output.push_str(&format!("Days tracked:      {}\n", stats.days_tracked));
    output.push_str(&format!(
        "This month:        {}\n",
        format_money(stats.current_month_spent, symbol)
    ));

    if let Some(top) = &stats.most_spent_category {
        output.push_str(&format!(
            "Top category:      {} ({})\n",
            title_case(&top.name),
            format_money(top.amount, symbol)
        ));
    }
    if let Some(frequent) = &stats.most_frequent_expense {
        output.push_str(&format!(
            "Most frequent:     {} ({} times)\n",
            frequent.name, frequent.count
        ));
    }
    if let Some(day) = &stats.most_expensive_day {
        output.push_str(&format!(
            "Most expensive day: {} ({})\n",
            day.date,
            format_money(day.amount, symbol)
        ));
    }

    output.push_str("\nTop expenses\n");
    for (rank, top) in stats.top_expenses.iter().enumerate() {
        output.push_str(&format!(
            "  {}. {} {}\n",
            rank + 1,
            top.name,
            format_money(top.total_amount, symbol)
        ));
    }

    output.push_str("\nBy category\n");
    output.push_str(&format_breakdown(&stats.category_breakdown, symbol, true));

    output.push_str("\nBy month\n");
    output.push_str(&format_breakdown(&stats.monthly_spending, symbol, false));

    output
}

/// Statistics for one month
pub fn format_monthly_stats(stats: &MonthlyStats, symbol: &str) -> String {
    if stats.transaction_count == 0 {
        return format!("No expenses recorded for {}.\n", stats.month);
    }

    let mut output = String::new();
    output.push_str(&format!("Statistics for {}\n", stats.month));
    output.push_str(&separator(40));
    output.push('\n');
    output.push_str(&format!("Total spent:   {}\n", format_money(stats.total_spent, symbol)));
    output.push_str(&format!("Transactions:  {}\n", stats.transaction_count));
    output.push_str(&format!("Days tracked:  {}\n", stats.days_tracked));
    output.push_str(&format!("Daily average: {}\n", format_money(stats.daily_average, symbol)));

    output.push_str("\nBy category\n");
    output.push_str(&format_breakdown(&stats.categories, symbol, true));

    output.push_str("\nLargest expenses\n");
    for (rank, top) in stats.top_expenses.iter().enumerate() {
        output.push_str(&format!(
            "  {:>2}. {} {}\n",
            rank + 1,
            top.name,
            format_money(top.amount, symbol)
        ));
    }

    output
}

fn format_breakdown(totals: &IndexMap<String, f64>, symbol: &str, title: bool) -> String {
    let width = totals.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    totals
        .iter()
        .map(|(key, amount)| {
            let label = if title { title_case(key) } else { key.clone() };
            format!("  {:<width$}  {}\n", label, format_money(*amount, symbol), width = width)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::analytics::{NamedAmount, NamedTotal};

    #[test]
    fn test_comprehensive_stats() {
        let mut stats = ComprehensiveStats {
            total_spent: 2300.0,
            daily_average: 1150.0,
            transaction_count: 3,
            days_tracked: 2,
            most_spent_category: Some(NamedAmount {
                name: "food".into(),
                amount: 1800.0,
            }),
            top_expenses: vec![NamedTotal {
                name: "Lunch".into(),
                total_amount: 1500.0,
            }],
            ..Default::default()
        };
        stats.category_breakdown.insert("food".into(), 1800.0);
        stats.monthly_spending.insert("2025-01".into(), 2300.0);

        let output = format_comprehensive_stats(&stats, "₦");
        assert!(output.contains("Total spent:       ₦2,300.00"));
        assert!(output.contains("Top category:      Food (₦1,800.00)"));
        assert!(output.contains("1. Lunch ₦1,500.00"));
        assert!(output.contains("2025-01  ₦2,300.00"));
    }

    #[test]
    fn test_empty_stats() {
        let output = format_comprehensive_stats(&ComprehensiveStats::default(), "₦");
        assert_eq!(output, "No expenses recorded yet.\n");
    }

    #[test]
    fn test_monthly_stats() {
        let mut categories = IndexMap::new();
        categories.insert("transport".to_string(), 500.0);
        let stats = MonthlyStats {
            month: "2025-01".into(),
            total_spent: 500.0,
            transaction_count: 1,
            days_tracked: 1,
            daily_average: 500.0,
            categories,
            top_expenses: vec![NamedAmount {
                name: "Taxi".into(),
                amount: 500.0,
            }],
        };

        let output = format_monthly_stats(&stats, "$");
        assert!(output.starts_with("Statistics for 2025-01"));
        assert!(output.contains("Transport  $500.00"));
        assert!(output.contains(" 1. Taxi $500.00"));
    }
}
