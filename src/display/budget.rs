//! Budget display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::format::{format_money, format_percentage, separator};
use crate::models::MonthlyBudget;

/// How far through a budget the month's spending is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetHealth {
    OnTrack,
    OverHalf,
    OverThreeQuarters,
    Critical,
    Exceeded,
}

impl BudgetHealth {
    pub fn of(budget: &MonthlyBudget) -> Self {
        let used = budget.percentage_used();
        if budget.is_over_budget() {
            Self::Exceeded
        } else if used > 90.0 {
            Self::Critical
        } else if used > 75.0 {
            Self::OverThreeQuarters
        } else if used > 50.0 {
            Self::OverHalf
        } else {
            Self::OnTrack
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Exceeded => "🚨 Over budget!",
            Self::Critical => "⚠️  Warning: over 90% of the budget used",
            Self::OverThreeQuarters => "⚠️  Caution: over 75% of the budget used",
            Self::OverHalf => "ℹ️  Over half of the budget used",
            Self::OnTrack => "✓ On track",
        }
    }
}

/// Status block for one month
pub fn format_budget_status(budget: &MonthlyBudget, symbol: &str) -> String {
    if budget.amount == 0.0 {
        return format!(
            "No budget set for {}.\nSpent so far: {}\n",
            budget.month,
            format_money(budget.spent, symbol)
        );
    }

    let mut output = String::new();
    output.push_str(&format!("Budget status for {}\n", budget.month));
    output.push_str(&separator(30));
    output.push('\n');
    output.push_str(&format!("Budget:    {}\n", format_money(budget.amount, symbol)));
    output.push_str(&format!("Spent:     {}\n", format_money(budget.spent, symbol)));
    output.push_str(&format!("Remaining: {}\n", format_money(budget.remaining(), symbol)));
    output.push_str(&format!("Used:      {}\n", format_percentage(budget.percentage_used())));
    output.push_str(BudgetHealth::of(budget).message());
    output.push('\n');
    output
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Budget")]
    amount: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Carried")]
    carried: &'static str,
}

/// Every recorded month, plus the auto-reset setting
pub fn format_budget_history(history: &[MonthlyBudget], auto_reset: bool, symbol: &str) -> String {
    let auto_reset = if auto_reset { "enabled" } else { "disabled" };
    if history.is_empty() {
        return format!("No budget history.\nAuto-reset: {}\n", auto_reset);
    }

    let rows = history.iter().map(|b| HistoryRow {
        month: b.month.clone(),
        amount: format_money(b.amount, symbol),
        spent: format_money(b.spent, symbol),
        remaining: format_money(b.remaining(), symbol),
        used: format_percentage(b.percentage_used()),
        carried: if b.reset_from_previous { "yes" } else { "" },
    });

    format!(
        "{}\nAuto-reset: {}\n",
        Table::new(rows).with(Style::rounded()),
        auto_reset
    )
}
