//! Analytics service
//!
//! Aggregate views over the ledger: period summaries, all-time statistics
//! and per-month statistics. Expenses are categorized on the fly; nothing
//! here writes to storage.
//!
//! Arg-max and top-N ties go to the first key seen in ledger order. All
//! money values in the results are rounded to two decimals.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::warn;

use super::category::category_totals;
use crate::error::LedgerResult;
use crate::models::{month_of, parse_date, parse_month, CategoryRegistry, Ledger};
use crate::storage::Storage;

/// An expense tagged with its date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatedExpense {
    pub date: String,
    pub expense: String,
    pub amount: f64,
}

/// Totals for a filtered slice of the ledger
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total: f64,
    pub expenses: Vec<DatedExpense>,
    pub period: String,
    pub transaction_count: usize,
    pub days_with_expenses: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedAmount {
    pub name: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayAmount {
    pub date: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedTotal {
    pub name: String,
    pub total_amount: f64,
}

/// All-time statistics
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ComprehensiveStats {
    pub total_spent: f64,
    /// Total over the calendar span from first to last date, gaps included
    pub daily_average: f64,
    pub transaction_count: usize,
    /// Calendar days from the first to the last date, inclusive
    pub days_tracked: i64,
    pub most_spent_category: Option<NamedAmount>,
    pub most_frequent_expense: Option<NamedCount>,
    pub most_expensive_day: Option<DayAmount>,
    pub top_expenses: Vec<NamedTotal>,
    pub top_categories: Vec<NamedTotal>,
    pub category_breakdown: IndexMap<String, f64>,
    pub monthly_spending: IndexMap<String, f64>,
    pub current_month_spent: f64,
}

/// Statistics for a single month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStats {
    pub month: String,
    pub total_spent: f64,
    pub transaction_count: usize,
    /// Distinct dates with expenses
    pub days_tracked: usize,
    pub daily_average: f64,
    pub categories: IndexMap<String, f64>,
    pub top_expenses: Vec<NamedAmount>,
}

impl MonthlyStats {
    fn empty(month: &str) -> Self {
        Self {
            month: month.to_string(),
            total_spent: 0.0,
            transaction_count: 0,
            days_tracked: 0,
            daily_average: 0.0,
            categories: IndexMap::new(),
            top_expenses: Vec::new(),
        }
    }
}

const TOP_OVERALL: usize = 5;
const TOP_MONTHLY: usize = 10;

/// Service for spending analytics
pub struct AnalyticsService<'a> {
    storage: &'a Storage,
}

impl<'a> AnalyticsService<'a> {
    /// Create a new analytics service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Totals for an already-filtered ledger. No categorization.
    pub fn summary_stats(ledger: &Ledger, period: &str) -> SummaryStats {
        let expenses: Vec<DatedExpense> = ledger
            .entries()
            .map(|(date, entry)| DatedExpense {
                date: date.to_string(),
                expense: entry.expense.clone(),
                amount: entry.amount,
            })
            .collect();

        SummaryStats {
            total: round2(ledger.total()),
            transaction_count: expenses.len(),
            days_with_expenses: ledger.days_with_expenses(),
            period: period.to_string(),
            expenses,
        }
    }

    /// Statistics over the whole ledger
    pub fn comprehensive_stats(&self) -> LedgerResult<ComprehensiveStats> {
        let ledger = self.storage.ledger.load()?;
        let registry = self.storage.categories.load()?;
        let current_month = self.storage.clock().current_month();
        Ok(comprehensive(&ledger, &registry, &current_month))
    }

    /// Statistics for one `YYYY-MM` month
    pub fn monthly_stats(&self, month: &str) -> LedgerResult<MonthlyStats> {
        let month = parse_month(month)?;
        let ledger = self.storage.ledger.load()?.for_month(&month);
        let registry = self.storage.categories.load()?;
        Ok(monthly(&ledger, &registry, &month))
    }
}

fn comprehensive(ledger: &Ledger, registry: &CategoryRegistry, current_month: &str) -> ComprehensiveStats {
    if ledger.transaction_count() == 0 {
        return ComprehensiveStats::default();
    }

    let mut daily: IndexMap<String, f64> = IndexMap::new();
    let mut monthly: IndexMap<String, f64> = IndexMap::new();
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    let mut per_expense: IndexMap<String, f64> = IndexMap::new();

    for (date, entry) in ledger.entries() {
        *daily.entry(date.to_string()).or_default() += entry.amount;
        *monthly.entry(month_of(date).to_string()).or_default() += entry.amount;
        *counts.entry(entry.expense.clone()).or_default() += 1;
        *per_expense.entry(entry.expense.clone()).or_default() += entry.amount;
    }
    let categories = category_totals(registry, ledger);

    let total_spent = ledger.total();
    let days_tracked = calendar_span(daily.keys());
    let daily_average = if days_tracked > 0 {
        total_spent / days_tracked as f64
    } else {
        0.0
    };

    ComprehensiveStats {
        total_spent: round2(total_spent),
        daily_average: round2(daily_average),
        transaction_count: ledger.transaction_count(),
        days_tracked,
        most_spent_category: arg_max(&categories).map(|(name, amount)| NamedAmount {
            name: name.to_string(),
            amount: round2(amount),
        }),
        most_frequent_expense: arg_max(&counts).map(|(name, count)| NamedCount {
            name: name.to_string(),
            count,
        }),
        most_expensive_day: arg_max(&daily).map(|(date, amount)| DayAmount {
            date: date.to_string(),
            amount: round2(amount),
        }),
        top_expenses: top_n(&per_expense, TOP_OVERALL)
            .into_iter()
            .map(|(name, total)| NamedTotal {
                name,
                total_amount: round2(total),
            })
            .collect(),
        top_categories: top_n(&categories, TOP_OVERALL)
            .into_iter()
            .map(|(name, total)| NamedTotal {
                name,
                total_amount: round2(total),
            })
            .collect(),
        current_month_spent: round2(monthly.get(current_month).copied().unwrap_or(0.0)),
        category_breakdown: round_values(categories),
        monthly_spending: round_values(monthly),
    }
}

fn monthly(ledger: &Ledger, registry: &CategoryRegistry, month: &str) -> MonthlyStats {
    if ledger.is_empty() {
        return MonthlyStats::empty(month);
    }

    let mut per_expense: IndexMap<String, f64> = IndexMap::new();
    for (_, entry) in ledger.entries() {
        *per_expense.entry(entry.expense.clone()).or_default() += entry.amount;
    }

    let total_spent = ledger.total();
    let days_tracked = ledger.len();
    let daily_average = if days_tracked > 0 {
        total_spent / days_tracked as f64
    } else {
        0.0
    };

    MonthlyStats {
        month: month.to_string(),
        total_spent: round2(total_spent),
        transaction_count: ledger.transaction_count(),
        days_tracked,
        daily_average: round2(daily_average),
        categories: round_values(category_totals(registry, ledger)),
        top_expenses: top_n(&per_expense, TOP_MONTHLY)
            .into_iter()
            .map(|(name, amount)| NamedAmount {
                name,
                amount: round2(amount),
            })
            .collect(),
    }
}

/// Inclusive day count between the earliest and latest parsable date keys
fn calendar_span<'k>(dates: impl Iterator<Item = &'k String>) -> i64 {
    let parsed: Vec<NaiveDate> = dates
        .filter_map(|date| match parse_date(date) {
            Ok(day) => Some(day),
            Err(e) => {
                warn!(date = %date, error = %e, "skipping unparsable date in span");
                None
            }
        })
        .collect();

    match (parsed.iter().min(), parsed.iter().max()) {
        (Some(first), Some(last)) => (*last - *first).num_days() + 1,
        _ => 0,
    }
}

/// Largest value; the first key wins ties
fn arg_max<V: PartialOrd + Copy>(map: &IndexMap<String, V>) -> Option<(&str, V)> {
    let mut best: Option<(&str, V)> = None;
    for (key, value) in map {
        if best.map_or(true, |(_, top)| *value > top) {
            best = Some((key.as_str(), *value));
        }
    }
    best
}

/// The `n` largest entries, descending. Equal values keep map order.
fn top_n(map: &IndexMap<String, f64>, n: usize) -> Vec<(String, f64)> {
    let mut entries: Vec<(String, f64)> = map.iter().map(|(k, v)| (k.clone(), *v)).collect();
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    entries.truncate(n);
    entries
}

fn round_values(map: IndexMap<String, f64>) -> IndexMap<String, f64> {
    map.into_iter().map(|(k, v)| (k, round2(v))).collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
