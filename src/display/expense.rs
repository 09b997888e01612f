//! Expense display formatting
//!
//! Tables of expenses for a single day, a span of days, and period
//! summaries.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::format::{format_money, separator};
use crate::models::{ExpenseEntry, Ledger};
use crate::services::analytics::SummaryStats;

#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Expense")]
    expense: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Tabled)]
struct LedgerRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Expense")]
    expense: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Entries for one date with their positions and a total
pub fn format_day(date: &str, entries: &[ExpenseEntry], symbol: &str) -> String {
    if entries.is_empty() {
        return format!("No expenses recorded for {}.\n", date);
    }

    let rows = entries.iter().enumerate().map(|(index, e)| DayRow {
        index,
        expense: e.expense.clone(),
        amount: format_money(e.amount, symbol),
    });
    let total: f64 = entries.iter().map(|e| e.amount).sum();

    format!(
        "Expenses for {}\n{}\nTotal: {}\n",
        date,
        Table::new(rows).with(Style::rounded()),
        format_money(total, symbol)
    )
}

/// Every entry in a ledger, one row each, with a per-day subtotal line
/// after the table and a grand total
pub fn format_ledger(title: &str, ledger: &Ledger, symbol: &str) -> String {
    if ledger.is_empty() {
        return format!("{}\nNo expenses found.\n", title);
    }

    let rows = ledger.days().flat_map(|(date, entries)| {
        entries.iter().enumerate().map(move |(index, e)| LedgerRow {
            date: date.to_string(),
            index,
            expense: e.expense.clone(),
            amount: format_money(e.amount, symbol),
        })
    });

    let mut output = format!("{}\n{}\n", title, Table::new(rows).with(Style::rounded()));
    for (date, entries) in ledger.days() {
        let day_total: f64 = entries.iter().map(|e| e.amount).sum();
        output.push_str(&format!("  {}  {}\n", date, format_money(day_total, symbol)));
    }
    output.push_str(&separator(30));
    output.push('\n');
    output.push_str(&format!("Total: {}\n", format_money(ledger.total(), symbol)));
    output
}

/// Totals for a period summary
pub fn format_summary(summary: &SummaryStats, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Summary {}\n", summary.period));
    output.push_str(&separator(30));
    output.push('\n');
    output.push_str(&format!("Total spent:        {}\n", format_money(summary.total, symbol)));
    output.push_str(&format!("Transactions:       {}\n", summary.transaction_count));
    output.push_str(&format!("Days with expenses: {}\n", summary.days_with_expenses));

    if summary.days_with_expenses > 0 {
        let average = summary.total / summary.days_with_expenses as f64;
        output.push_str(&format!("Average per day:    {}\n", format_money(average, symbol)));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::AnalyticsService;

    fn ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.add("2025-01-15", ExpenseEntry::new("Lunch", 1500.0));
        ledger.add("2025-01-15", ExpenseEntry::new("Transport", 500.0));
        ledger.add("2025-01-16", ExpenseEntry::new("Coffee", 300.0));
        ledger
    }

    #[test]
    fn test_format_day() {
        let ledger = ledger();
        let output = format_day("2025-01-15", ledger.by_date("2025-01-15"), "₦");
        assert!(output.contains("Lunch"));
        assert!(output.contains("₦1,500.00"));
        assert!(output.contains("Total: ₦2,000.00"));

        let empty = format_day("2025-01-01", &[], "₦");
        assert!(empty.contains("No expenses recorded for 2025-01-01"));
    }

    #[test]
    fn test_format_ledger() {
        let output = format_ledger("This week", &ledger(), "₦");
        assert!(output.contains("2025-01-16"));
        assert!(output.contains("Coffee"));
        assert!(output.contains("Total: ₦2,300.00"));

        assert!(format_ledger("This week", &Ledger::new(), "₦").contains("No expenses found"));
    }

    #[test]
    fn test_format_summary() {
        let summary = AnalyticsService::summary_stats(&ledger(), "for all time");
        let output = format_summary(&summary, "₦");
        assert!(output.contains("Summary for all time"));
        assert!(output.contains("₦2,300.00"));
        assert!(output.contains("Average per day:    ₦1,150.00"));
    }
}
