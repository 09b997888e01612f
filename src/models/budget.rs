//! Monthly budget models
//!
//! A [`Budget`] holds one [`MonthlyBudget`] per `YYYY-MM` month in insertion
//! order, plus the rollover state. Spending is always recomputed from the
//! ledger by the budget service; the stored `spent` is only a cache.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::expense::validate_amount;
use crate::config::RolloverSource;
use crate::error::LedgerResult;

/// Budget for a single month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyBudget {
    /// Month in YYYY-MM format
    pub month: String,

    /// Amount budgeted for the month
    pub amount: f64,

    /// Amount spent, as of the last recomputation
    pub spent: f64,

    /// When this entry was set
    pub created_at: NaiveDateTime,

    /// Whether this entry was carried over by a monthly rollover
    pub reset_from_previous: bool,
}

impl MonthlyBudget {
    /// Create a budget entry with nothing spent yet
    pub fn new(month: impl Into<String>, amount: f64, created_at: NaiveDateTime) -> LedgerResult<Self> {
        validate_amount(amount)?;
        Ok(Self {
            month: month.into(),
            amount,
            spent: 0.0,
            created_at,
            reset_from_previous: false,
        })
    }

    /// The unset budget reported for a month with no entry
    pub fn zero(month: impl Into<String>, created_at: NaiveDateTime) -> Self {
        Self {
            month: month.into(),
            amount: 0.0,
            spent: 0.0,
            created_at,
            reset_from_previous: false,
        }
    }

    /// Amount left; negative when over budget
    pub fn remaining(&self) -> f64 {
        self.amount - self.spent
    }

    /// Share of the budget used, capped at 100. Zero when no amount is set.
    pub fn percentage_used(&self) -> f64 {
        if self.amount == 0.0 {
            return 0.0;
        }
        (self.spent / self.amount * 100.0).min(100.0)
    }

    pub fn is_over_budget(&self) -> bool {
        self.spent > self.amount
    }
}

impl fmt::Display for MonthlyBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.2} of {:.2} ({:.1}%)",
            self.month,
            self.spent,
            self.amount,
            self.percentage_used()
        )
    }
}

/// What a rollover check did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rollover {
    /// Already on the current month, or auto-reset is off
    Current,
    /// The current month moved forward. `carried` is the amount copied into
    /// the new month, if any budget existed to copy from.
    Advanced { carried: Option<f64> },
}

/// All monthly budgets and the rollover state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BudgetFile", into = "BudgetFile")]
pub struct Budget {
    monthly_budgets: IndexMap<String, MonthlyBudget>,

    /// The last month rollover ran for, YYYY-MM. Empty until first load.
    pub current_month: String,

    /// Whether a new month inherits the previous budget amount
    pub auto_reset: bool,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            monthly_budgets: IndexMap::new(),
            current_month: String::new(),
            auto_reset: true,
        }
    }
}

impl Budget {
    pub fn new(current_month: impl Into<String>) -> Self {
        Self {
            current_month: current_month.into(),
            ..Self::default()
        }
    }

    pub fn get(&self, month: &str) -> Option<&MonthlyBudget> {
        self.monthly_budgets.get(month)
    }

    pub fn is_empty(&self) -> bool {
        self.monthly_budgets.is_empty()
    }

    /// Monthly budgets in insertion order
    pub fn months(&self) -> impl Iterator<Item = &MonthlyBudget> {
        self.monthly_budgets.values()
    }

    /// Store a monthly budget, replacing any entry for the same month.
    /// A replaced entry keeps its original insertion position.
    pub fn set(&mut self, budget: MonthlyBudget) -> Option<MonthlyBudget> {
        self.monthly_budgets.insert(budget.month.clone(), budget)
    }

    pub fn remove(&mut self, month: &str) -> Option<MonthlyBudget> {
        self.monthly_budgets.shift_remove(month)
    }

    /// Amount a new month would inherit
    pub fn rollover_amount(&self, source: RolloverSource) -> Option<f64> {
        let budget = match source {
            RolloverSource::LastInserted => self.monthly_budgets.values().last(),
            RolloverSource::LatestMonth => self
                .monthly_budgets
                .values()
                .max_by(|a, b| a.month.cmp(&b.month)),
        };
        budget.map(|b| b.amount)
    }

    /// Advance to `now_month` if auto-reset is on and the month changed,
    /// carrying the previous amount into a fresh entry.
    pub fn roll_over(
        &mut self,
        now_month: &str,
        source: RolloverSource,
        now: NaiveDateTime,
    ) -> Rollover {
        if !self.auto_reset || self.current_month == now_month {
            return Rollover::Current;
        }

        let carried = if self.current_month.is_empty() {
            None
        } else {
            self.rollover_amount(source)
        };

        if let Some(amount) = carried {
            self.set(MonthlyBudget {
                month: now_month.to_string(),
                amount,
                spent: 0.0,
                created_at: now,
                reset_from_previous: true,
            });
        }

        self.current_month = now_month.to_string();
        Rollover::Advanced { carried }
    }
}

/// On-disk shape of the budget file
#[derive(Serialize, Deserialize)]
struct BudgetFile {
    #[serde(default)]
    monthly_budgets: IndexMap<String, BudgetRecord>,
    #[serde(default)]
    current_month: String,
    #[serde(default = "default_auto_reset")]
    auto_reset: bool,
}

fn default_auto_reset() -> bool {
    true
}

/// On-disk shape of a monthly budget; the month is the map key
#[derive(Serialize, Deserialize)]
struct BudgetRecord {
    #[serde(default)]
    amount: f64,
    #[serde(default)]
    spent: f64,
    #[serde(default)]
    created_at: NaiveDateTime,
    #[serde(default)]
    reset_from_previous: bool,
}

impl From<BudgetFile> for Budget {
    fn from(file: BudgetFile) -> Self {
        let monthly_budgets = file
            .monthly_budgets
            .into_iter()
            .map(|(month, record)| {
                let budget = MonthlyBudget {
                    month: month.clone(),
                    amount: record.amount,
                    spent: record.spent,
                    created_at: record.created_at,
                    reset_from_previous: record.reset_from_previous,
                };
                (month, budget)
            })
            .collect();

        Self {
            monthly_budgets,
            current_month: file.current_month,
            auto_reset: file.auto_reset,
        }
    }
}

impl From<Budget> for BudgetFile {
    fn from(budget: Budget) -> Self {
        let monthly_budgets = budget
            .monthly_budgets
            .into_iter()
            .map(|(month, b)| {
                let record = BudgetRecord {
                    amount: b.amount,
                    spent: b.spent,
                    created_at: b.created_at,
                    reset_from_previous: b.reset_from_previous,
                };
                (month, record)
            })
            .collect();

        Self {
            monthly_budgets,
            current_month: budget.current_month,
            auto_reset: budget.auto_reset,
        }
    }
}
